//! Assistant command implementation

use anyhow::{bail, Result};

use pulse_core::assistant::{self, Persona, ASSISTANT_GREETING, QUICK_PROMPTS, WIDGET_GREETING};

/// Answer one question offline
///
/// There is no session here, so figures come from the default stats.
pub fn cmd_ask(message: &str, persona: Persona) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        bail!("Message must not be empty");
    }

    let greeting = match persona {
        Persona::Widget => WIDGET_GREETING,
        Persona::Full => ASSISTANT_GREETING,
    };
    println!("🤖 {}", greeting);
    println!();
    println!("> {}", message);
    println!();
    println!("{}", assistant::reply(persona, message, None));

    if persona == Persona::Full {
        println!();
        println!("Try also: {}", QUICK_PROMPTS.join(" · "));
    }

    Ok(())
}
