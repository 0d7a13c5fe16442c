#[derive(Debug, Clone)]
pub struct UciOption {
    pub name: &'static str,
    pub option_type: UciOptionType,
}

#[derive(Debug, Clone)]
pub enum UciOptionType {
    Spin { min: i32, max: i32 },
    Check,
}

impl UciOptionType {
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            UciOptionType::Spin { min, max } => {
                let parsed = value
                    .parse::<i32>()
                    .map_err(|e| format!("Invalid integer: {}", e))?;
                if parsed < *min || parsed > *max {
                    return Err(format!("Value {} out of range [{}, {}]", parsed, min, max));
                }
                Ok(())
            }
            UciOptionType::Check => match value {
                "true" | "false" => Ok(()),
                _ => Err("Boolean value must be 'true' or 'false'".to_string()),
            },
        }
    }

    pub fn to_uci<T>(&self, name: &str, current_value: &T) -> String
    where
        T: ToString,
    {
        match self {
            UciOptionType::Spin { min, max } => format!(
                "option name {} type spin default {} min {} max {}",
                name,
                current_value.to_string(),
                min,
                max
            ),
            UciOptionType::Check => format!(
                "option name {} type check default {}",
                name,
                current_value.to_string()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_validation() {
        let spin = UciOptionType::Spin { min: 1, max: 256 };
        assert!(spin.validate("8").is_ok());
        assert!(spin.validate("0").is_err());
        assert!(spin.validate("257").is_err());
        assert!(spin.validate("eight").is_err());
    }

    #[test]
    fn test_check_validation() {
        assert!(UciOptionType::Check.validate("true").is_ok());
        assert!(UciOptionType::Check.validate("false").is_ok());
        assert!(UciOptionType::Check.validate("yes").is_err());
    }

    #[test]
    fn test_option_lines() {
        let spin = UciOptionType::Spin { min: 1, max: 256 };
        assert_eq!(
            spin.to_uci("Threads", &4),
            "option name Threads type spin default 4 min 1 max 256"
        );
        assert_eq!(
            UciOptionType::Check.to_uci("Persistent Hash", &false),
            "option name Persistent Hash type check default false"
        );
    }
}
