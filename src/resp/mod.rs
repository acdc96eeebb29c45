/**
 * RESP - Redis Serialisation Protocol
 * https://redis.io/docs/reference/protocol-spec/
 */

pub mod token;
pub mod parser;
pub mod frame;
pub mod command;
