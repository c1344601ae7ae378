//! Reads header blocks from stdin and prints their elements.
//!
//! ```text
//! printf 'Content-Type: text/html;\r\n charset="utf-8"\r\n\r\n' | cargo run --example parse_stdin
//! ```

use futures::StreamExt;
use micro_header::codec::HeaderBlockDecoder;
use tokio_util::codec::FramedRead;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut blocks = FramedRead::new(tokio::io::stdin(), HeaderBlockDecoder::new());

    while let Some(result) = blocks.next().await {
        let block = match result {
            Ok(block) => block,
            Err(e) => {
                error!(cause = %e, "failed to parse header block");
                return;
            }
        };

        info!(header_count = block.len(), "received header block");
        for header in &block {
            println!("{}: {}", header.name(), header.value());
            for element in header.elements() {
                println!("  element {:?} = {:?}", element.name(), element.value());
                for param in element.parameters() {
                    println!("    param {:?} = {:?}", param.name(), param.value());
                }
            }
        }
    }
}
