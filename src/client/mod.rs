//! Typed command facade over one duplex byte channel.
//!
//! Every method validates its arguments, builds the request, writes it,
//! reads exactly one reply and maps it. Nothing is pipelined: a call owns
//! the channel (`&mut self`) until its reply is fully decoded.

mod bitmaps;
mod geo;
mod hashes;
mod hyperloglog;
mod keys;
mod lists;
mod sets;
mod sorted_sets;
mod streams;
mod strings;

use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufStream},
    time::timeout,
};
use tracing::{debug, trace, warn};

use crate::{
    config::ClientConfig,
    descriptor::CommandDescriptor,
    error::{Error, Result},
    reply::Shape,
    resp::{command::Command, frame::RESPFrame, parser::RESPParser},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Ready,
    /// A request was written and its reply not yet consumed. Seen from the
    /// outside only when a call was dropped mid-flight.
    InFlight,
    Broken,
}

pub struct Client<S> {
    stream: BufStream<S>,
    config: ClientConfig,
    state: ChannelState,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, ClientConfig::default())
    }

    pub fn with_config(stream: S, config: ClientConfig) -> Self {
        Self { stream: BufStream::new(stream), config, state: ChannelState::Ready }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    /**
     * Hands the channel back; bytes already buffered are lost
     */
    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }

    pub(crate) async fn run<D: Shape>(
        &mut self,
        descriptor: &CommandDescriptor<D>,
        command: Command,
    ) -> Result<D::Output> {
        self.run_as(descriptor, command, &descriptor.shape).await
    }

    /**
     * Like `run`, with the reply read through `shape` instead of the
     * descriptor's own, for options that change the reply (`WITHSCORES`,
     * `COUNT`, `WITH*` geo flags).
     */
    pub(crate) async fn run_as<D, R: Shape>(
        &mut self,
        descriptor: &CommandDescriptor<D>,
        command: Command,
        shape: &R,
    ) -> Result<R::Output> {
        descriptor.check(&command)?;

        match self.round_trip(&command).await? {
            RESPFrame::Error(message) => {
                debug!(command = command.name(), %message, "error reply");
                Err(Error::Remote(message))
            }
            frame => shape.map(frame).map_err(|err| {
                // A reply whose content breaks the protocol (bad stream id)
                // is as fatal as a framing error.
                if err.is_channel_fatal() {
                    self.state = ChannelState::Broken;
                    warn!(command = command.name(), error = %err, "channel broken");
                }
                err
            }),
        }
    }

    async fn round_trip(&mut self, command: &Command) -> Result<RESPFrame> {
        if self.state != ChannelState::Ready {
            self.state = ChannelState::Broken;
            return Err(Error::ChannelBroken);
        }

        let request = command.encode();
        debug!(command = command.name(), args = command.args().len(), "sending");

        self.state = ChannelState::InFlight;
        let exchange = Self::exchange(&mut self.stream, &request);
        let result = match self.config.response_timeout {
            Some(limit) => timeout(limit, exchange)
                .await
                .unwrap_or(Err(Error::Timeout(limit))),
            None => exchange.await,
        };

        match result {
            Ok(frame) => {
                self.state = ChannelState::Ready;
                trace!(command = command.name(), reply = frame.kind(), "received");
                Ok(frame)
            }
            Err(err) => {
                self.state = ChannelState::Broken;
                warn!(command = command.name(), error = %err, "channel broken");
                Err(err)
            }
        }
    }

    async fn exchange(stream: &mut BufStream<S>, request: &[u8]) -> Result<RESPFrame> {
        stream.write_all(request).await?;
        stream.flush().await?;
        Ok(RESPParser::parse(stream).await?)
    }
}
