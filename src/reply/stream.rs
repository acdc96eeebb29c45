use crate::{
    error::{Error, Result},
    resp::frame::RESPFrame,
    types::{
        StreamConsumerInfo, StreamEntry, StreamEntryId, StreamGroupInfo, StreamInfo,
        StreamPendingEntry,
    },
};

use super::{array, unexpected, Bulk, Int, List, Pairs, Shape, Text};

/// Stream entry id; a malformed id is a protocol error.
#[derive(Debug, Clone, Copy)]
pub struct EntryId;

impl Shape for EntryId {
    type Output = StreamEntryId;

    fn map(&self, frame: RESPFrame) -> Result<StreamEntryId> {
        Text.map(frame)?.parse()
    }
}

/// `[id, [field, value, …]]`; `None` for an entry deleted after it was referenced.
#[derive(Debug, Clone, Copy)]
struct Entry;

impl Shape for Entry {
    type Output = Option<StreamEntry>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        if frame.is_null() {
            return Ok(None);
        }
        let items = array("stream entry", frame)?;
        let [id, fields] = <[RESPFrame; 2]>::try_from(items)
            .map_err(|items| Error::shape("[id, fields]", format!("array of {}", items.len())))?;

        let id = EntryId.map(id)?;
        if fields.is_null() {
            return Ok(None);
        }
        Ok(Some(StreamEntry { id, fields: Pairs(Bulk, Bulk).map(fields)? }))
    }
}

/// Entries in wire order (`XRANGE`, `XREVRANGE`, `XCLAIM`); deleted entries are skipped.
#[derive(Debug, Clone, Copy)]
pub struct Entries;

impl Shape for Entries {
    type Output = Vec<StreamEntry>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        Ok(List(Entry).map(frame)?.into_iter().flatten().collect())
    }
}

/// Extended `XPENDING` rows: `[id, consumer, idle, deliveries]`.
#[derive(Debug, Clone, Copy)]
pub struct PendingEntries;

impl Shape for PendingEntries {
    type Output = Vec<StreamPendingEntry>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        array("pending entries", frame)?
            .into_iter()
            .map(|row| {
                let row = array("pending entry", row)?;
                let [id, consumer, idle, delivered] = <[RESPFrame; 4]>::try_from(row).map_err(|row| {
                    Error::shape("[id, consumer, idle, deliveries]", format!("array of {}", row.len()))
                })?;

                Ok(StreamPendingEntry {
                    id: EntryId.map(id)?,
                    consumer: Text.map(consumer)?,
                    idle_millis: Int.map(idle)?,
                    delivered: Int.map(delivered)?,
                })
            })
            .collect()
    }
}

/// `XINFO STREAM`
#[derive(Debug, Clone, Copy)]
pub struct Info;

impl Shape for Info {
    type Output = StreamInfo;

    fn map(&self, frame: RESPFrame) -> Result<StreamInfo> {
        let mut fields = Fields::parse(frame)?;

        Ok(StreamInfo {
            length: fields.take("length", Int)?,
            radix_tree_keys: fields.take("radix-tree-keys", Int)?,
            radix_tree_nodes: fields.take("radix-tree-nodes", Int)?,
            groups: fields.take("groups", Int)?,
            last_generated_id: fields.take("last-generated-id", EntryId)?,
            first_entry: fields.take("first-entry", Entry)?,
            last_entry: fields.take("last-entry", Entry)?,
        })
    }
}

/// `XINFO GROUPS`
#[derive(Debug, Clone, Copy)]
pub struct Groups;

impl Shape for Groups {
    type Output = Vec<StreamGroupInfo>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        array("group list", frame)?
            .into_iter()
            .map(|group| {
                let mut fields = Fields::parse(group)?;
                Ok(StreamGroupInfo {
                    name: fields.take("name", Text)?,
                    consumers: fields.take("consumers", Int)?,
                    pending: fields.take("pending", Int)?,
                    last_delivered_id: fields.take("last-delivered-id", EntryId)?,
                })
            })
            .collect()
    }
}

/// `XINFO CONSUMERS`
#[derive(Debug, Clone, Copy)]
pub struct Consumers;

impl Shape for Consumers {
    type Output = Vec<StreamConsumerInfo>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        array("consumer list", frame)?
            .into_iter()
            .map(|consumer| {
                let mut fields = Fields::parse(consumer)?;
                Ok(StreamConsumerInfo {
                    name: fields.take("name", Text)?,
                    pending: fields.take("pending", Int)?,
                    idle_millis: fields.take("idle", Int)?,
                })
            })
            .collect()
    }
}

/**
 * Flat `name, value, …` reply whose values have mixed shapes.
 * Names the client doesn't know about are ignored.
 */
struct Fields(Vec<(String, RESPFrame)>);

impl Fields {
    fn parse(frame: RESPFrame) -> Result<Self> {
        let items = array("flat name/value array", frame)?;
        if items.len() % 2 != 0 {
            return Err(Error::shape("even length name/value array", format!("array of {}", items.len())));
        }

        let mut fields = Vec::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(name), Some(value)) = (items.next(), items.next()) {
            match name {
                RESPFrame::Bulk(_) | RESPFrame::Simple(_) => fields.push((Text.map(name)?, value)),
                other => return Err(unexpected("field name", &other)),
            }
        }
        Ok(Self(fields))
    }

    fn take<S: Shape>(&mut self, name: &'static str, shape: S) -> Result<S::Output> {
        let position = self
            .0
            .iter()
            .position(|(field, _)| field == name)
            .ok_or_else(|| Error::shape(name, "missing field"))?;

        shape.map(self.0.swap_remove(position).1)
    }
}
