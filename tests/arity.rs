mod common;

use common::*;
use redis_command_core::{
    descriptor::{
        BITCOUNT, EXISTS, GEODIST, GEORADIUS, GETBIT, GETRANGE, HGET, HLEN, INCR, LINSERT, LLEN, LRANGE,
        PFCOUNT, PING, RESTORE, SCAN, SET, SISMEMBER, SMEMBERS, SORT, TTL, XGROUP_CREATE,
        XGROUP_DELCONSUMER, XGROUP_DESTROY, XGROUP_SETID, XINFO_CONSUMERS, XINFO_GROUPS, XLEN,
        XPENDING, XRANGE, ZCARD, ZCOUNT, ZRANGEBYLEX,
    },
    params::{GeoRadiusParams, GeoUnit, ListPosition, ScanParams, SortParams, StreamId},
    resp::frame::RESPFrame,
    types::{GeoCoordinate, SCAN_START},
};

#[tokio::test]
async fn calls_without_options_send_only_fixed_tokens() -> anyhow::Result<()> {
    let empty = || array(vec![]);
    let (mut client, server) = serve(vec![
        int(1),
        bulk("abc"),
        empty(),
        int(0),
        empty(),
        empty(),
        ok(),
        empty(),
        empty(),
        int(-1),
        array(vec![RESPFrame::bulk("0"), RESPFrame::Array(vec![])]),
        ok(),
        Reply::Frame(RESPFrame::Simple("PONG".to_owned())),
        empty(),
        ok(),
    ]);

    client.exists("k").await?;
    client.getrange("k", 0, -1).await?;
    client.lrange("l", 0, -1).await?;
    client.zcount("z", "-inf", "+inf").await?;
    client.zrange_by_lex("z", "-", "+", None).await?;
    client.xrange("s", StreamId::Min, StreamId::Max, None).await?;
    client.xgroup_create("s", "g", StreamId::Last, false).await?;
    client
        .georadius("geo", GeoCoordinate::new(13.4, 52.5), 10.0, GeoUnit::Kilometers, &GeoRadiusParams::new())
        .await?;
    client.xpending("s", "g", StreamId::Min, StreamId::Max, 10, None).await?;
    client.linsert("l", ListPosition::BEFORE, "pivot", "v").await?;
    client.scan(SCAN_START, &ScanParams::new()).await?;
    client.set("k", "v").await?;
    client.ping().await?;
    client.sort("ids", &SortParams::new()).await?;
    client.restore("k", 0, "payload").await?;

    let expected = [
        (EXISTS.name, EXISTS.arity, EXISTS.modifiers),
        (GETRANGE.name, GETRANGE.arity, GETRANGE.modifiers),
        (LRANGE.name, LRANGE.arity, LRANGE.modifiers),
        (ZCOUNT.name, ZCOUNT.arity, ZCOUNT.modifiers),
        (ZRANGEBYLEX.name, ZRANGEBYLEX.arity, ZRANGEBYLEX.modifiers),
        (XRANGE.name, XRANGE.arity, XRANGE.modifiers),
        (XGROUP_CREATE.name, XGROUP_CREATE.arity, XGROUP_CREATE.modifiers),
        (GEORADIUS.name, GEORADIUS.arity, GEORADIUS.modifiers),
        (XPENDING.name, XPENDING.arity, XPENDING.modifiers),
        (LINSERT.name, LINSERT.arity, LINSERT.modifiers),
        (SCAN.name, SCAN.arity, SCAN.modifiers),
        (SET.name, SET.arity, SET.modifiers),
        (PING.name, PING.arity, PING.modifiers),
        (SORT.name, SORT.arity, SORT.modifiers),
        (RESTORE.name, RESTORE.arity, RESTORE.modifiers),
    ];

    let requests = finish(client, server).await?;
    assert_fixed_arity(&requests, &expected);
    Ok(())
}

#[tokio::test]
async fn every_family_sends_only_fixed_tokens() -> anyhow::Result<()> {
    let empty = || array(vec![]);
    let (mut client, server) = serve(vec![
        null(),
        int(2),
        empty(),
        int(0),
        int(0),
        int(3),
        int(1),
        int(4),
        int(-1),
        int(7),
        int(9),
        null(),
        int(2),
        ok(),
        int(0),
        empty(),
        empty(),
        int(1),
    ]);

    client.hget("h", "f").await?;
    client.hlen("h").await?;
    client.smembers("s").await?;
    client.sismember("s", "m").await?;
    client.getbit("bits", 7).await?;
    client.bitcount("bits").await?;
    client.pfcount("hll").await?;
    client.llen("l").await?;
    client.ttl("k").await?;
    client.incr("n").await?;
    client.zcard("z").await?;
    client.geodist("geo", "a", "b", None).await?;
    client.xlen("s").await?;
    client.xgroup_setid("s", "g", StreamId::Last).await?;
    client.xgroup_delconsumer("s", "g", "alice").await?;
    client.xinfo_groups("s").await?;
    client.xinfo_consumers("s", "g").await?;
    client.xgroup_destroy("s", "g").await?;

    let expected = [
        (HGET.name, HGET.arity, HGET.modifiers),
        (HLEN.name, HLEN.arity, HLEN.modifiers),
        (SMEMBERS.name, SMEMBERS.arity, SMEMBERS.modifiers),
        (SISMEMBER.name, SISMEMBER.arity, SISMEMBER.modifiers),
        (GETBIT.name, GETBIT.arity, GETBIT.modifiers),
        (BITCOUNT.name, BITCOUNT.arity, BITCOUNT.modifiers),
        (PFCOUNT.name, PFCOUNT.arity, PFCOUNT.modifiers),
        (LLEN.name, LLEN.arity, LLEN.modifiers),
        (TTL.name, TTL.arity, TTL.modifiers),
        (INCR.name, INCR.arity, INCR.modifiers),
        (ZCARD.name, ZCARD.arity, ZCARD.modifiers),
        (GEODIST.name, GEODIST.arity, GEODIST.modifiers),
        (XLEN.name, XLEN.arity, XLEN.modifiers),
        (XGROUP_SETID.name, XGROUP_SETID.arity, XGROUP_SETID.modifiers),
        (XGROUP_DELCONSUMER.name, XGROUP_DELCONSUMER.arity, XGROUP_DELCONSUMER.modifiers),
        (XINFO_GROUPS.name, XINFO_GROUPS.arity, XINFO_GROUPS.modifiers),
        (XINFO_CONSUMERS.name, XINFO_CONSUMERS.arity, XINFO_CONSUMERS.modifiers),
        (XGROUP_DESTROY.name, XGROUP_DESTROY.arity, XGROUP_DESTROY.modifiers),
    ];

    let requests = finish(client, server).await?;
    assert_fixed_arity(&requests, &expected);
    Ok(())
}

fn assert_fixed_arity(requests: &[Vec<String>], expected: &[(&str, usize, &[&str])]) {
    assert_eq!(expected.len(), requests.len());

    for (request, &(name, arity, modifiers)) in requests.iter().zip(expected) {
        let words: Vec<&str> = name.split(' ').collect();
        assert_eq!(words, request[..words.len()], "{}", name);
        assert_eq!(words.len() + arity, request.len(), "{}", name);
        assert!(
            !request[words.len()..].iter().any(|token| modifiers.contains(&token.as_str())),
            "{} carries a modifier: {:?}",
            name,
            request
        );
    }
}
