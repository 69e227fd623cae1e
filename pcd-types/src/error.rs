use std::fmt;

/// Colour channel of an [`Rgb`](crate::point::Rgb) record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// A colour component did not fit in 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{channel} component {value} is out of range 0..=255")]
pub struct RangeError {
    pub channel: Channel,
    pub value: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_channel_and_value() {
        let err = RangeError {
            channel: Channel::Green,
            value: 256,
        };
        assert_eq!(err.to_string(), "green component 256 is out of range 0..=255");
    }

    #[test]
    fn negative_value_in_message() {
        let err = RangeError {
            channel: Channel::Blue,
            value: -1,
        };
        assert_eq!(err.to_string(), "blue component -1 is out of range 0..=255");
    }
}
