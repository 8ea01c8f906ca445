use std::io;

use colored::Colorize;

mod llm;
mod message;

use llm::{ChatRequest, Options};
use message::Message;

const MODEL: &str = "tinyllama:latest"; // or "llama3.2:1b" / "qwen2.5:1.5b"
const URL: &str = "http://localhost:11434/api/chat";

const NUM_PREDICT: u32 = 160;
const TEMPERATURE: f64 = 0.6;

fn conversation() -> Vec<Message> {
    vec![
        Message::system("You are Pi-IoT Assistant: concise, step-by-step."),
        Message::user("Give me a minimal example of using PWM on a Pi."),
    ]
}

fn main() {
    let messages = conversation();
    let request = ChatRequest {
        model: MODEL,
        messages: &messages,
        options: Options { num_predict: NUM_PREDICT, temperature: TEMPERATURE },
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = llm::stream_chat(URL, &request, &mut stdout) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}
