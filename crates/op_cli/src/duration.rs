use std::str::FromStr;
use std::time::Duration;

/// A timeout such as `10s`, `1m30s` or a bare number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3600),
        _ => None,
    }
}

fn too_large() -> String {
    "Duration too large".to_string()
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut seconds = 0u64;
        let mut digits = String::new();
        let mut parts = 0;

        for c in s.chars().filter(|c| !c.is_whitespace()) {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let multiplier = unit_seconds(c).ok_or_else(|| format!("Invalid duration unit: {}", c))?;
            let value: u64 = digits
                .parse()
                .map_err(|_| format!("Missing number before unit: {}", c))?;
            seconds = value
                .checked_mul(multiplier)
                .and_then(|part| seconds.checked_add(part))
                .ok_or_else(too_large)?;
            digits.clear();
            parts += 1;
        }

        if !digits.is_empty() {
            let value = digits
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            seconds = seconds.checked_add(value).ok_or_else(too_large)?;
            parts += 1;
        }

        if parts == 0 {
            return Err("Duration must include a number".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(seconds)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_durations() {
        assert_eq!("10s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(10));
        assert_eq!("1m 30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!("15".parse::<HumanDuration>().unwrap().0, Duration::from_secs(15));
    }

    #[test]
    fn test_reject_invalid_durations() {
        assert!("".parse::<HumanDuration>().is_err());
        assert!("5d".parse::<HumanDuration>().is_err());
        assert!("s".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_reject_overflowing_durations() {
        assert_eq!(
            "9999999999999999999h".parse::<HumanDuration>(),
            Err("Duration too large".to_string())
        );
        assert_eq!(
            format!("{}s 1", u64::MAX).parse::<HumanDuration>(),
            Err("Duration too large".to_string())
        );
        assert_eq!(
            format!("{}", u64::MAX).parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(u64::MAX)
        );
    }
}
