use core::fmt;

/// Video length as reported by the Data API (`contentDetails.duration`,
/// an ISO-8601 duration such as `PT1H2M3S`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TrackDuration {
    seconds: u64,
}

impl TrackDuration {
    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Parses the `PnDTnHnMnS` subset the Data API emits. Live streams come
    /// back as `P0D`, ordinary videos as `PT#M#S` variants.
    pub fn parse_iso8601(value: &str) -> Result<Self, String> {
        let rest = value
            .strip_prefix('P')
            .ok_or_else(|| format!("Failed to parse duration: '{}'", value))?;
        let (date_part, time_part) = rest.split_once('T').unwrap_or((rest, ""));

        let mut seconds = 0u64;
        for (part, units) in [
            (date_part, &[('D', 86_400)][..]),
            (time_part, &[('H', 3_600), ('M', 60), ('S', 1)][..]),
        ] {
            let mut digits = String::new();
            for ch in part.chars() {
                if ch.is_ascii_digit() {
                    digits.push(ch);
                    continue;
                }
                let (_, factor) = units
                    .iter()
                    .find(|(unit, _)| *unit == ch)
                    .ok_or_else(|| format!("Unexpected designator '{}' in '{}'", ch, value))?;
                let count: u64 = digits
                    .parse()
                    .map_err(|_| format!("Missing number before '{}' in '{}'", ch, value))?;
                seconds += count * factor;
                digits.clear();
            }
            if !digits.is_empty() {
                return Err(format!("Trailing digits in duration: '{}'", value));
            }
        }
        Ok(Self { seconds })
    }

    pub fn as_seconds(&self) -> u64 {
        self.seconds
    }
}

// `HH:MM:SS` once an hour component exists, `MM:SS` otherwise.
impl fmt::Display for TrackDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / 3_600;
        let minutes = (self.seconds % 3_600) / 60;
        let seconds = self.seconds % 60;
        if hours > 0 {
            write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            write!(f, "{:02}:{:02}", minutes, seconds)
        }
    }
}
