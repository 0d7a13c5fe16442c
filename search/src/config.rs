use std::str::FromStr;
use uci::{UciOption, UciOptionType, UciOutput};

use crate::transposition::{Replacement, DEFAULT_SHARDS};

fn uci(include: bool, name: &'static str, option_type: UciOptionType) -> Option<UciOption> {
    if include {
        Some(UciOption { name, option_type })
    } else {
        None
    }
}

macro_rules! define_config {
    ($(($field:ident: $type:ty, $uci_name:expr, $uci_type:expr, $default:expr, $include:expr)),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub struct EngineConfig {
            $(pub $field: ConfigParam<$type>,)*
        }

        impl Default for EngineConfig {
            fn default() -> Self {
                Self {
                    $($field: ConfigParam {
                        value: $default,
                        uci: uci($include, $uci_name, $uci_type),
                    },)*
                }
            }
        }

        impl EngineConfig {
            pub fn update_from_uci(&mut self, uci_name: &str, value: &str) -> Result<(), String> {
                match uci_name {
                    $($uci_name if $include => self.$field.update_from_uci(value),)*
                    _ => Err(format!("Unknown parameter: {}", uci_name)),
                }
            }

            pub fn to_uci(&self, output: &std::sync::mpsc::Sender<UciOutput>) -> Result<(), std::sync::mpsc::SendError<UciOutput>> {
                $(
                    if self.$field.uci.is_some() {
                        output.send(UciOutput::Option(self.$field.to_uci()))?;
                    }
                )*
                Ok(())
            }
        }
    };
}

define_config!(
    // Standard UCI parameters
    (hash_size: i32, "Hash", UciOptionType::Spin { min: 1, max: 2048 }, 64, true), // Transposition table budget in MB
    (threads: i32, "Threads", UciOptionType::Spin { min: 1, max: 256 }, default_threads(), true), // Worker pool size

    // Search shape
    (depth: u8, "Depth", UciOptionType::Spin { min: 1, max: 64 }, 4, true), // Plies searched below the root
    (checkpoint_period: i32, "Checkpoint Period", UciOptionType::Spin { min: 1, max: 1_000_000 }, 1000, true), // Nodes between stop-flag polls
    (safety_margin_ms: i32, "Safety Margin", UciOptionType::Spin { min: 0, max: 5000 }, 100, true), // Subtracted from every time limit

    // Transposition table
    (persistent_hash: bool, "Persistent Hash", UciOptionType::Check, false, true), // Keep the table between searches
    (depth_preferred: bool, "Depth Preferred Replacement", UciOptionType::Check, true, true), // Never overwrite deeper entries
    (hash_shards: i32, "Hash Shards", UciOptionType::Spin { min: 1, max: 1024 }, DEFAULT_SHARDS as i32, cfg!(feature = "tuning")), // Independently locked table shards

    // Move ordering at the oracle boundary
    (capture_ordering: bool, "Capture Ordering", UciOptionType::Check, true, true), // Try captures first (MVV-LVA)
);

fn default_threads() -> i32 {
    num_cpus::get().clamp(1, 256) as i32
}

impl EngineConfig {
    pub fn replacement(&self) -> Replacement {
        if self.depth_preferred.value {
            Replacement::DepthPreferred
        } else {
            Replacement::Always
        }
    }

    pub fn thread_count(&self) -> usize {
        self.threads.value.max(1) as usize
    }

    pub fn shard_count(&self) -> usize {
        self.hash_shards.value.max(1) as usize
    }

    pub fn hash_size_mb(&self) -> usize {
        self.hash_size.value.max(1) as usize
    }
}

#[derive(Debug, Clone)]
pub struct ConfigParam<T> {
    pub value: T,
    pub uci: Option<UciOption>,
}

impl<T> ConfigParam<T>
where
    T: FromStr + ToString + Clone,
    T::Err: std::fmt::Display,
{
    pub fn update_from_uci(&mut self, value: &str) -> Result<(), String> {
        if let Some(uci_meta) = &self.uci {
            uci_meta.option_type.validate(value)?;
        }

        let new_value = value
            .parse::<T>()
            .map_err(|e| format!("Parse error: {}", e))?;

        self.value = new_value;
        Ok(())
    }

    pub fn to_uci(&self) -> String {
        match &self.uci {
            Some(uci_meta) => uci_meta.option_type.to_uci(uci_meta.name, &self.value),
            None => String::new(),
        }
    }
}
