//! Replay Module
//!
//! Reconstructs and prints the recorded call history of an operation.

use crate::cache::history::{inputs_key, outputs_key};
use crate::error::Result;
use crate::store::KeyValueStore;

// == Replay Engine ==
/// Renders the recorded history of an operation identity.
pub struct ReplayEngine<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> ReplayEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    // == Render ==
    /// Renders the call history for `identity` as text.
    ///
    /// The header count comes from the operation's counter key; when the
    /// counter is absent (counting disabled), the input log length stands
    /// in for it. Calls are listed in invocation order, pairing inputs[i]
    /// with outputs[i]. When the two logs have different lengths (a call
    /// failed between the input and output append), only the pairable
    /// prefix is listed.
    pub async fn render(&self, identity: &str) -> Result<String> {
        let inputs = self.store.lrange(&inputs_key(identity), 0, -1).await?;
        let outputs = self.store.lrange(&outputs_key(identity), 0, -1).await?;

        let count = match self.store.get(identity).await? {
            Some(bytes) => String::from_utf8_lossy(&bytes)
                .parse::<u64>()
                .unwrap_or(inputs.len() as u64),
            None => inputs.len() as u64,
        };

        let mut out = format!("{} was called {} times:\n", identity, count);

        for (args, result) in inputs.iter().zip(outputs.iter()) {
            out.push_str(&format!(
                "{}(*{}) -> {}\n",
                identity,
                String::from_utf8_lossy(args),
                String::from_utf8_lossy(result)
            ));
        }

        Ok(out)
    }

    // == Print ==
    /// Prints the call history for `identity` to stdout.
    pub async fn print(&self, identity: &str) -> Result<()> {
        print!("{}", self.render(identity).await?);
        Ok(())
    }
}
