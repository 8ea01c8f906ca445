use std::io::{BufRead, BufReader, Write};

use reqwest::blocking::Client;
use serde::{Serialize, Deserialize};

use crate::message::Message;

/// Request body for the Ollama `/api/chat` endpoint.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub options: Options,
}

/// Inference parameters sent alongside the conversation.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct Options {
    pub num_predict: u32,
    pub temperature: f64,
}

/// One decoded line of the NDJSON response stream. Ollama emits more fields
/// (timings, token counts); only the text fragment and the end-of-stream
/// marker matter here.
#[derive(Deserialize, Debug, Default)]
pub struct StreamChunk {
    #[serde(default)]
    pub message: Option<ChunkMessage>,
    #[serde(default)]
    pub done: bool,
}

#[derive(Deserialize, Debug, Default)]
pub struct ChunkMessage {
    #[serde(default)]
    pub content: String,
}

impl StreamChunk {
    fn content(&self) -> &str {
        self.message.as_ref().map(|m| m.content.as_str()).unwrap_or("")
    }
}

/// POST the request and copy each streamed text fragment to `out` as it
/// arrives, flushing after every fragment.
pub fn stream_chat(
    url: &str,
    request: &ChatRequest,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    // The default blocking-client timeout covers the entire body read, which
    // a slow generation can exceed.
    let client = Client::builder().timeout(None).build()?;

    let res = match client.post(url).json(request).send() {
        Ok(res) => {
            if res.status().is_success() { res } else {
                return Err(match res.status().as_u16() {
                    404 => Box::new(std::io::Error::new(std::io::ErrorKind::NotFound, "Chat endpoint not found")),
                    code => Box::new(std::io::Error::new(std::io::ErrorKind::Other, format!("Chat request failed with status code: {}", code))),
                });
            }
        }
        Err(e) => return Err(if e.is_connect() {
            Box::new(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Failed to connect to the inference server"))
        } else { Box::new(e) }),
    };

    // One JSON object per line; blank lines are keep-alive framing.
    let reader = BufReader::new(res);
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let chunk: StreamChunk = serde_json::from_str(&line)?;
        out.write_all(chunk.content().as_bytes())?;
        out.flush()?;
        if chunk.done {
            break;
        }
    }

    Ok(())
}
