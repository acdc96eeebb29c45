//! Declarative description of every supported command.
//!
//! A descriptor names the command, how many positional tokens it always
//! carries, whether a repeated group follows, which trailing modifier
//! keywords it may carry, and the shape its reply is read with. The client
//! methods are thin: they build tokens, check them against the descriptor,
//! and hand the reply to the descriptor's shape.

use crate::{
    error::{Error, Result},
    reply::{
        Bulk, Consumers, Coordinate, Entries, EntryId, Flag, Float, GeoResults, Groups, Info,
        Int, List, Map, Nullable, Page, Pair, Pairs, PendingEntries, ScoreMembers, Set, Status,
        Text, Unit, Written,
    },
    resp::command::Command,
};

#[derive(Debug, Clone, Copy)]
pub struct CommandDescriptor<S> {
    /// Command name; subcommands are written as `"XGROUP CREATE"`.
    pub name: &'static str,
    /// Positional argument tokens every call carries, key included.
    pub arity: usize,
    /// Width of the repeated group following the positional tokens. Commands
    /// with a repeated group need at least one of it.
    pub repeated: usize,
    /// Keywords of the optional trailing modifiers.
    pub modifiers: &'static [&'static str],
    /// How the reply is read when no option changes it.
    pub shape: S,
}

impl<S> CommandDescriptor<S> {
    pub fn command(&self) -> Command {
        Command::new(self.name)
    }

    /**
     * Refuses requests with fewer tokens than the command can possibly take
     */
    pub fn check(&self, command: &Command) -> Result<()> {
        let required = self.arity + self.repeated;
        let supplied = command.args().len();
        if supplied < required {
            return Err(Error::argument(
                self.name,
                format!("expected at least {} arguments, got {}", required, supplied),
            ));
        }
        Ok(())
    }
}

macro_rules! describe {
    ($name:literal, $arity:literal, $shape:expr) => {
        describe!($name, $arity, 0, [], $shape)
    };
    ($name:literal, $arity:literal, [$($modifier:literal),*], $shape:expr) => {
        describe!($name, $arity, 0, [$($modifier),*], $shape)
    };
    ($name:literal, $arity:literal, $repeated:literal, [$($modifier:literal),*], $shape:expr) => {
        CommandDescriptor {
            name: $name,
            arity: $arity,
            repeated: $repeated,
            modifiers: &[$($modifier),*],
            shape: $shape,
        }
    };
}

const PLAIN_GEO: GeoResults = GeoResults { with_distance: false, with_hash: false, with_coordinate: false };
const GEO_MODIFIERS: &[&str] = &["WITHCOORD", "WITHDIST", "WITHHASH", "COUNT", "ANY", "ASC", "DESC"];

// Keys
pub const EXISTS: CommandDescriptor<Flag> = describe!("EXISTS", 1, Flag);
pub const PERSIST: CommandDescriptor<Flag> = describe!("PERSIST", 1, Flag);
pub const TYPE: CommandDescriptor<Status> = describe!("TYPE", 1, Status);
pub const DUMP: CommandDescriptor<Nullable<Bulk>> = describe!("DUMP", 1, Nullable(Bulk));
pub const RESTORE: CommandDescriptor<Unit> = describe!("RESTORE", 3, ["REPLACE"], Unit);
pub const EXPIRE: CommandDescriptor<Flag> = describe!("EXPIRE", 2, Flag);
pub const PEXPIRE: CommandDescriptor<Flag> = describe!("PEXPIRE", 2, Flag);
pub const EXPIREAT: CommandDescriptor<Flag> = describe!("EXPIREAT", 2, Flag);
pub const PEXPIREAT: CommandDescriptor<Flag> = describe!("PEXPIREAT", 2, Flag);
pub const TTL: CommandDescriptor<Int> = describe!("TTL", 1, Int);
pub const PTTL: CommandDescriptor<Int> = describe!("PTTL", 1, Int);
pub const TOUCH: CommandDescriptor<Int> = describe!("TOUCH", 0, 1, [], Int);
pub const DEL: CommandDescriptor<Int> = describe!("DEL", 0, 1, [], Int);
pub const UNLINK: CommandDescriptor<Int> = describe!("UNLINK", 0, 1, [], Int);
pub const MOVE: CommandDescriptor<Flag> = describe!("MOVE", 2, Flag);
pub const ECHO: CommandDescriptor<Bulk> = describe!("ECHO", 1, Bulk);
pub const PING: CommandDescriptor<Status> = describe!("PING", 0, Status);
pub const SORT: CommandDescriptor<List<Nullable<Bulk>>> =
    describe!("SORT", 1, ["BY", "LIMIT", "GET", "ASC", "DESC", "ALPHA"], List(Nullable(Bulk)));
pub const SCAN: CommandDescriptor<Page<List<Bulk>>> =
    describe!("SCAN", 1, ["MATCH", "COUNT", "TYPE"], Page(List(Bulk)));

// Strings
pub const SET: CommandDescriptor<Written> =
    describe!("SET", 2, ["NX", "XX", "EX", "PX", "EXAT", "PXAT", "KEEPTTL"], Written);
pub const GET: CommandDescriptor<Nullable<Bulk>> = describe!("GET", 1, Nullable(Bulk));
pub const GETSET: CommandDescriptor<Nullable<Bulk>> = describe!("GETSET", 2, Nullable(Bulk));
pub const MGET: CommandDescriptor<List<Nullable<Bulk>>> = describe!("MGET", 0, 1, [], List(Nullable(Bulk)));
pub const SETNX: CommandDescriptor<Flag> = describe!("SETNX", 2, Flag);
pub const SETEX: CommandDescriptor<Unit> = describe!("SETEX", 3, Unit);
pub const PSETEX: CommandDescriptor<Unit> = describe!("PSETEX", 3, Unit);
pub const INCR: CommandDescriptor<Int> = describe!("INCR", 1, Int);
pub const DECR: CommandDescriptor<Int> = describe!("DECR", 1, Int);
pub const INCRBY: CommandDescriptor<Int> = describe!("INCRBY", 2, Int);
pub const DECRBY: CommandDescriptor<Int> = describe!("DECRBY", 2, Int);
pub const INCRBYFLOAT: CommandDescriptor<Float> = describe!("INCRBYFLOAT", 2, Float);
pub const APPEND: CommandDescriptor<Int> = describe!("APPEND", 2, Int);
pub const STRLEN: CommandDescriptor<Int> = describe!("STRLEN", 1, Int);
pub const SETRANGE: CommandDescriptor<Int> = describe!("SETRANGE", 3, Int);
pub const GETRANGE: CommandDescriptor<Bulk> = describe!("GETRANGE", 3, Bulk);
pub const SUBSTR: CommandDescriptor<Bulk> = describe!("SUBSTR", 3, Bulk);

// Bitmaps
pub const SETBIT: CommandDescriptor<Flag> = describe!("SETBIT", 3, Flag);
pub const GETBIT: CommandDescriptor<Flag> = describe!("GETBIT", 2, Flag);
pub const BITCOUNT: CommandDescriptor<Int> = describe!("BITCOUNT", 1, Int);
pub const BITPOS: CommandDescriptor<Int> = describe!("BITPOS", 2, Int);
pub const BITFIELD: CommandDescriptor<List<Nullable<Int>>> =
    describe!("BITFIELD", 1, ["GET", "SET", "INCRBY", "OVERFLOW"], List(Nullable(Int)));
pub const BITFIELD_RO: CommandDescriptor<List<Nullable<Int>>> =
    describe!("BITFIELD_RO", 1, ["GET"], List(Nullable(Int)));

// Hashes
pub const HSET: CommandDescriptor<Int> = describe!("HSET", 1, 2, [], Int);
pub const HSETNX: CommandDescriptor<Flag> = describe!("HSETNX", 3, Flag);
pub const HMSET: CommandDescriptor<Unit> = describe!("HMSET", 1, 2, [], Unit);
pub const HGET: CommandDescriptor<Nullable<Bulk>> = describe!("HGET", 2, Nullable(Bulk));
pub const HMGET: CommandDescriptor<List<Nullable<Bulk>>> = describe!("HMGET", 1, 1, [], List(Nullable(Bulk)));
pub const HINCRBY: CommandDescriptor<Int> = describe!("HINCRBY", 3, Int);
pub const HINCRBYFLOAT: CommandDescriptor<Float> = describe!("HINCRBYFLOAT", 3, Float);
pub const HEXISTS: CommandDescriptor<Flag> = describe!("HEXISTS", 2, Flag);
pub const HDEL: CommandDescriptor<Int> = describe!("HDEL", 1, 1, [], Int);
pub const HLEN: CommandDescriptor<Int> = describe!("HLEN", 1, Int);
pub const HSTRLEN: CommandDescriptor<Int> = describe!("HSTRLEN", 2, Int);
pub const HKEYS: CommandDescriptor<Set<Bulk>> = describe!("HKEYS", 1, Set(Bulk));
pub const HVALS: CommandDescriptor<List<Bulk>> = describe!("HVALS", 1, List(Bulk));
pub const HGETALL: CommandDescriptor<Map<Bulk, Bulk>> = describe!("HGETALL", 1, Map(Bulk, Bulk));
pub const HSCAN: CommandDescriptor<Page<Pairs<Bulk, Bulk>>> =
    describe!("HSCAN", 2, ["MATCH", "COUNT"], Page(Pairs(Bulk, Bulk)));

// Lists
pub const RPUSH: CommandDescriptor<Int> = describe!("RPUSH", 1, 1, [], Int);
pub const LPUSH: CommandDescriptor<Int> = describe!("LPUSH", 1, 1, [], Int);
pub const RPUSHX: CommandDescriptor<Int> = describe!("RPUSHX", 1, 1, [], Int);
pub const LPUSHX: CommandDescriptor<Int> = describe!("LPUSHX", 1, 1, [], Int);
pub const LLEN: CommandDescriptor<Int> = describe!("LLEN", 1, Int);
pub const LRANGE: CommandDescriptor<List<Bulk>> = describe!("LRANGE", 3, List(Bulk));
pub const LTRIM: CommandDescriptor<Unit> = describe!("LTRIM", 3, Unit);
pub const LINDEX: CommandDescriptor<Nullable<Bulk>> = describe!("LINDEX", 2, Nullable(Bulk));
pub const LSET: CommandDescriptor<Unit> = describe!("LSET", 3, Unit);
pub const LREM: CommandDescriptor<Int> = describe!("LREM", 3, Int);
pub const LPOP: CommandDescriptor<Nullable<Bulk>> = describe!("LPOP", 1, Nullable(Bulk));
pub const RPOP: CommandDescriptor<Nullable<Bulk>> = describe!("RPOP", 1, Nullable(Bulk));
pub const LPOS: CommandDescriptor<Nullable<Int>> =
    describe!("LPOS", 2, ["RANK", "COUNT", "MAXLEN"], Nullable(Int));
pub const LINSERT: CommandDescriptor<Int> = describe!("LINSERT", 4, Int);
pub const BLPOP: CommandDescriptor<Nullable<Pair<Bulk, Bulk>>> =
    describe!("BLPOP", 2, Nullable(Pair(Bulk, Bulk)));
pub const BRPOP: CommandDescriptor<Nullable<Pair<Bulk, Bulk>>> =
    describe!("BRPOP", 2, Nullable(Pair(Bulk, Bulk)));

// Sets
pub const SADD: CommandDescriptor<Int> = describe!("SADD", 1, 1, [], Int);
pub const SREM: CommandDescriptor<Int> = describe!("SREM", 1, 1, [], Int);
pub const SMEMBERS: CommandDescriptor<Set<Bulk>> = describe!("SMEMBERS", 1, Set(Bulk));
pub const SPOP: CommandDescriptor<Nullable<Bulk>> = describe!("SPOP", 1, Nullable(Bulk));
pub const SCARD: CommandDescriptor<Int> = describe!("SCARD", 1, Int);
pub const SISMEMBER: CommandDescriptor<Flag> = describe!("SISMEMBER", 2, Flag);
pub const SMISMEMBER: CommandDescriptor<List<Flag>> = describe!("SMISMEMBER", 1, 1, [], List(Flag));
pub const SRANDMEMBER: CommandDescriptor<Nullable<Bulk>> = describe!("SRANDMEMBER", 1, Nullable(Bulk));
pub const SSCAN: CommandDescriptor<Page<List<Bulk>>> =
    describe!("SSCAN", 2, ["MATCH", "COUNT"], Page(List(Bulk)));

// Sorted sets
pub const ZADD: CommandDescriptor<Int> = describe!("ZADD", 1, 2, ["NX", "XX", "GT", "LT", "CH", "INCR"], Int);
pub const ZINCRBY: CommandDescriptor<Float> = describe!("ZINCRBY", 3, Float);
pub const ZREM: CommandDescriptor<Int> = describe!("ZREM", 1, 1, [], Int);
pub const ZRANK: CommandDescriptor<Nullable<Int>> = describe!("ZRANK", 2, Nullable(Int));
pub const ZREVRANK: CommandDescriptor<Nullable<Int>> = describe!("ZREVRANK", 2, Nullable(Int));
pub const ZRANGE: CommandDescriptor<List<Bulk>> = describe!("ZRANGE", 3, ["WITHSCORES"], List(Bulk));
pub const ZREVRANGE: CommandDescriptor<List<Bulk>> = describe!("ZREVRANGE", 3, ["WITHSCORES"], List(Bulk));
pub const ZCARD: CommandDescriptor<Int> = describe!("ZCARD", 1, Int);
pub const ZSCORE: CommandDescriptor<Nullable<Float>> = describe!("ZSCORE", 2, Nullable(Float));
pub const ZMSCORE: CommandDescriptor<List<Nullable<Float>>> =
    describe!("ZMSCORE", 1, 1, [], List(Nullable(Float)));
pub const ZPOPMAX: CommandDescriptor<ScoreMembers> = describe!("ZPOPMAX", 1, ScoreMembers);
pub const ZPOPMIN: CommandDescriptor<ScoreMembers> = describe!("ZPOPMIN", 1, ScoreMembers);
pub const ZCOUNT: CommandDescriptor<Int> = describe!("ZCOUNT", 3, Int);
pub const ZLEXCOUNT: CommandDescriptor<Int> = describe!("ZLEXCOUNT", 3, Int);
pub const ZRANGEBYSCORE: CommandDescriptor<List<Bulk>> =
    describe!("ZRANGEBYSCORE", 3, ["WITHSCORES", "LIMIT"], List(Bulk));
pub const ZREVRANGEBYSCORE: CommandDescriptor<List<Bulk>> =
    describe!("ZREVRANGEBYSCORE", 3, ["WITHSCORES", "LIMIT"], List(Bulk));
pub const ZRANGEBYLEX: CommandDescriptor<List<Bulk>> = describe!("ZRANGEBYLEX", 3, ["LIMIT"], List(Bulk));
pub const ZREVRANGEBYLEX: CommandDescriptor<List<Bulk>> = describe!("ZREVRANGEBYLEX", 3, ["LIMIT"], List(Bulk));
pub const ZREMRANGEBYRANK: CommandDescriptor<Int> = describe!("ZREMRANGEBYRANK", 3, Int);
pub const ZREMRANGEBYSCORE: CommandDescriptor<Int> = describe!("ZREMRANGEBYSCORE", 3, Int);
pub const ZREMRANGEBYLEX: CommandDescriptor<Int> = describe!("ZREMRANGEBYLEX", 3, Int);
pub const ZSCAN: CommandDescriptor<Page<ScoreMembers>> =
    describe!("ZSCAN", 2, ["MATCH", "COUNT"], Page(ScoreMembers));

// HyperLogLog
pub const PFADD: CommandDescriptor<Flag> = describe!("PFADD", 1, Flag);
pub const PFCOUNT: CommandDescriptor<Int> = describe!("PFCOUNT", 1, Int);

// Geo
pub const GEOADD: CommandDescriptor<Int> = describe!("GEOADD", 1, 3, [], Int);
pub const GEODIST: CommandDescriptor<Nullable<Float>> = describe!("GEODIST", 3, Nullable(Float));
pub const GEOHASH: CommandDescriptor<List<Nullable<Text>>> = describe!("GEOHASH", 1, 1, [], List(Nullable(Text)));
pub const GEOPOS: CommandDescriptor<List<Nullable<Coordinate>>> =
    describe!("GEOPOS", 1, 1, [], List(Nullable(Coordinate)));
pub const GEORADIUS: CommandDescriptor<GeoResults> = CommandDescriptor {
    name: "GEORADIUS",
    arity: 5,
    repeated: 0,
    modifiers: GEO_MODIFIERS,
    shape: PLAIN_GEO,
};
pub const GEORADIUS_RO: CommandDescriptor<GeoResults> = CommandDescriptor {
    name: "GEORADIUS_RO",
    ..GEORADIUS
};
pub const GEORADIUSBYMEMBER: CommandDescriptor<GeoResults> = CommandDescriptor {
    name: "GEORADIUSBYMEMBER",
    arity: 4,
    ..GEORADIUS
};
pub const GEORADIUSBYMEMBER_RO: CommandDescriptor<GeoResults> = CommandDescriptor {
    name: "GEORADIUSBYMEMBER_RO",
    ..GEORADIUSBYMEMBER
};

// Streams
pub const XADD: CommandDescriptor<EntryId> = describe!("XADD", 2, 2, ["MAXLEN", "~"], EntryId);
pub const XLEN: CommandDescriptor<Int> = describe!("XLEN", 1, Int);
pub const XRANGE: CommandDescriptor<Entries> = describe!("XRANGE", 3, ["COUNT"], Entries);
pub const XREVRANGE: CommandDescriptor<Entries> = describe!("XREVRANGE", 3, ["COUNT"], Entries);
pub const XACK: CommandDescriptor<Int> = describe!("XACK", 2, 1, [], Int);
pub const XDEL: CommandDescriptor<Int> = describe!("XDEL", 1, 1, [], Int);
pub const XTRIM: CommandDescriptor<Int> = describe!("XTRIM", 3, ["~"], Int);
pub const XGROUP_CREATE: CommandDescriptor<Unit> = describe!("XGROUP CREATE", 3, ["MKSTREAM"], Unit);
pub const XGROUP_SETID: CommandDescriptor<Unit> = describe!("XGROUP SETID", 3, Unit);
pub const XGROUP_DESTROY: CommandDescriptor<Flag> = describe!("XGROUP DESTROY", 2, Flag);
pub const XGROUP_DELCONSUMER: CommandDescriptor<Int> = describe!("XGROUP DELCONSUMER", 3, Int);
pub const XPENDING: CommandDescriptor<PendingEntries> = describe!("XPENDING", 5, PendingEntries);
pub const XCLAIM: CommandDescriptor<Entries> =
    describe!("XCLAIM", 4, 1, ["IDLE", "TIME", "RETRYCOUNT", "FORCE", "JUSTID"], Entries);
pub const XINFO_STREAM: CommandDescriptor<Info> = describe!("XINFO STREAM", 1, Info);
pub const XINFO_GROUPS: CommandDescriptor<Groups> = describe!("XINFO GROUPS", 1, Groups);
pub const XINFO_CONSUMERS: CommandDescriptor<Consumers> = describe!("XINFO CONSUMERS", 2, Consumers);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_requires_positional_tokens() {
        assert!(GETRANGE.check(&GETRANGE.command().arg("k").arg(0i64).arg(-1i64)).is_ok());
        assert!(matches!(
            GETRANGE.check(&GETRANGE.command().arg("k")),
            Err(Error::Argument { command: "GETRANGE", .. })
        ));
    }

    #[test]
    fn check_requires_one_repeated_group() {
        assert!(matches!(
            ZADD.check(&ZADD.command().arg("z")),
            Err(Error::Argument { command: "ZADD", .. })
        ));
        assert!(ZADD.check(&ZADD.command().arg("z").arg(1.0).arg("m")).is_ok());
    }

    #[test]
    fn read_only_geo_variants_share_schema() {
        assert_eq!(5, GEORADIUS_RO.arity);
        assert_eq!(4, GEORADIUSBYMEMBER_RO.arity);
        assert_eq!(GEORADIUS.modifiers, GEORADIUSBYMEMBER_RO.modifiers);
    }
}
