//! One connection's read/route/write loop.

use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::error::Result;
use crate::router::PacketRouter;
use crate::transport::frame::FrameSplitter;

/// Drive `stream` until either side closes.
///
/// Inbound frames are routed strictly in arrival order; outbound packets
/// from follow-up triggers are written as they are queued. The router's
/// disconnect entry point runs exactly once when the loop ends.
pub async fn run<S>(
    stream: S,
    router: Arc<PacketRouter>,
    mut out_rx: mpsc::Receiver<Bytes>,
    max_frame: usize,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (mut rd, mut wr) = tokio::io::split(stream);
    let mut frames = FrameSplitter::new(max_frame);

    let result: Result<()> = loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(packet) => {
                        if let Err(e) = wr.write_all(&packet).await {
                            break Err(e.into());
                        }
                    }
                    None => break Ok(()),
                }
            }

            // inbound reader
            read = rd.read_buf(frames.buffer_mut()) => {
                match read {
                    Ok(0) => break Ok(()),
                    Ok(_) => {
                        if let Err(e) = route_buffered(&mut frames, &router) {
                            break Err(e);
                        }
                    }
                    Err(e) => break Err(e.into()),
                }
            }
        }
    };

    if let Err(e) = &result {
        tracing::warn!(error = %e, "connection closed with error");
    }
    router.on_disconnected();
    result
}

fn route_buffered(frames: &mut FrameSplitter, router: &PacketRouter) -> Result<()> {
    while let Some(frame) = frames.next_frame()? {
        router.dispatch(&frame);
    }
    Ok(())
}
