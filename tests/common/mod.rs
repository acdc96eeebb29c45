#![allow(dead_code)]

use bytes::Bytes;
use redis_command_core::{
    resp::{frame::RESPFrame, parser::RESPParser},
    Client, ClientConfig,
};
use tokio::{
    io::{duplex, AsyncWriteExt, BufReader, DuplexStream},
    task::JoinHandle,
};

/// What the scripted server does with the next request it reads.
pub enum Reply {
    Frame(RESPFrame),
    /// Bytes written verbatim, for malformed replies
    Raw(&'static [u8]),
    /// Read the request and never answer
    Hold,
    /// Read the request and close the connection
    Close,
}

pub fn ok() -> Reply {
    Reply::Frame(RESPFrame::Simple("OK".to_owned()))
}

pub fn int(n: i64) -> Reply {
    Reply::Frame(RESPFrame::Integer(n))
}

pub fn bulk(data: &'static str) -> Reply {
    Reply::Frame(RESPFrame::bulk(data))
}

pub fn null() -> Reply {
    Reply::Frame(RESPFrame::Null)
}

pub fn error(message: &str) -> Reply {
    Reply::Frame(RESPFrame::Error(message.to_owned()))
}

pub fn array(items: Vec<RESPFrame>) -> Reply {
    Reply::Frame(RESPFrame::Array(items))
}

pub fn bulks(items: &[&'static str]) -> RESPFrame {
    RESPFrame::Array(items.iter().map(|item| RESPFrame::bulk(*item)).collect())
}

/// Requests as the server decoded them, one token list per command
pub type Requests = Vec<Vec<String>>;

pub fn serve(script: Vec<Reply>) -> (Client<DuplexStream>, JoinHandle<Requests>) {
    serve_with(ClientConfig::default(), script)
}

/**
 * In-memory store stand-in. Answers each request with the next scripted
 * reply, keeps reading (without answering) once the script runs out, and
 * returns every request it saw when the client side is dropped.
 */
pub fn serve_with(config: ClientConfig, script: Vec<Reply>) -> (Client<DuplexStream>, JoinHandle<Requests>) {
    let (client_end, server_end) = duplex(64 * 1024);

    let server = tokio::spawn(async move {
        let mut stream = BufReader::new(server_end);
        let mut script = script.into_iter();
        let mut requests = vec![];

        while let Ok(request) = RESPParser::parse(&mut stream).await {
            requests.push(tokens(request));

            let written = match script.next() {
                Some(Reply::Frame(frame)) => stream.get_mut().write_all(&frame.to_bytes()).await,
                Some(Reply::Raw(bytes)) => stream.get_mut().write_all(bytes).await,
                Some(Reply::Hold) | None => Ok(()),
                Some(Reply::Close) => break,
            };
            if written.is_err() {
                break;
            }
        }
        requests
    });

    (Client::with_config(client_end, config), server)
}

fn tokens(request: RESPFrame) -> Vec<String> {
    match request {
        RESPFrame::Array(items) => items
            .into_iter()
            .map(|item| match item {
                RESPFrame::Bulk(data) => text(&data),
                other => panic!("request token is not a bulk string: {:?}", other),
            })
            .collect(),
        other => panic!("request is not an array: {:?}", other),
    }
}

pub fn text(data: &Bytes) -> String {
    String::from_utf8_lossy(data).into_owned()
}

/// Drops the client so the server sees end of stream, then collects what it received
pub async fn finish(client: Client<DuplexStream>, server: JoinHandle<Requests>) -> anyhow::Result<Requests> {
    drop(client);
    Ok(server.await?)
}
