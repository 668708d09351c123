//! Fixed-size re-chunking of byte streams.

use bytes::{Bytes, BytesMut};
use futures::stream::{self, Stream, StreamExt};
use std::pin::Pin;

struct State<S> {
    inner: Pin<Box<S>>,
    buffer: BytesMut,
    done: bool,
}

/// Regroup a byte stream into chunks of exactly `chunk_size` bytes.
///
/// Only the final chunk may be shorter. An error from the inner stream is
/// passed through and ends the output.
pub fn rechunk<S, E>(inner: S, chunk_size: usize) -> impl Stream<Item = Result<Bytes, E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let chunk_size = chunk_size.max(1);
    let state = State {
        inner: Box::pin(inner),
        buffer: BytesMut::with_capacity(chunk_size),
        done: false,
    };

    stream::unfold(state, move |mut state| async move {
        if state.done {
            return None;
        }
        loop {
            if state.buffer.len() >= chunk_size {
                let chunk = state.buffer.split_to(chunk_size).freeze();
                return Some((Ok(chunk), state));
            }
            match state.inner.next().await {
                Some(Ok(bytes)) => state.buffer.extend_from_slice(&bytes),
                Some(Err(err)) => {
                    state.done = true;
                    return Some((Err(err), state));
                }
                None => {
                    state.done = true;
                    if state.buffer.is_empty() {
                        return None;
                    }
                    let chunk = state.buffer.split().freeze();
                    return Some((Ok(chunk), state));
                }
            }
        }
    })
}
