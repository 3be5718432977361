use std::collections::HashMap;

use tracing::trace;

use crate::error::ReconcileError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    /// Accepts `#rgb` and `#rrggbb`, the leading `#` is optional.
    pub fn parse_hex(input: &str) -> Result<Self, ReconcileError> {
        let invalid = || ReconcileError::InvalidColour(input.to_owned());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16)
                .map(f64::from)
                .map_err(|_| invalid())
        };
        match hex.len() {
            3 => Ok(Self {
                red: channel(&hex[0..1].repeat(2))?,
                green: channel(&hex[1..2].repeat(2))?,
                blue: channel(&hex[2..3].repeat(2))?,
            }),
            6 => Ok(Self {
                red: channel(&hex[0..2])?,
                green: channel(&hex[2..4])?,
                blue: channel(&hex[4..6])?,
            }),
            _ => Err(invalid()),
        }
    }

    #[must_use]
    pub fn mix(self, other: Self, amount: f64) -> Self {
        Self {
            red: (other.red - self.red).mul_add(amount, self.red),
            green: (other.green - self.green).mul_add(amount, self.green),
            blue: (other.blue - self.blue).mul_add(amount, self.blue),
        }
    }

    #[must_use]
    pub fn to_css(self) -> String {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped to the channel range first"
        )]
        let channel = |value: f64| value.round().clamp(0.0, 255.0) as u8;
        format!(
            "rgb({},{},{})",
            channel(self.red),
            channel(self.green),
            channel(self.blue)
        )
    }
}

/// Colour stops as stored on a shift category, e.g. `"#000000,#ffffff"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<Rgb>,
}

impl Gradient {
    pub fn parse(input: &str) -> Result<Self, ReconcileError> {
        let stops = input
            .split(',')
            .map(Rgb::parse_hex)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stops })
    }

    /// `position` is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn at(&self, position: f64) -> Rgb {
        let position = position.clamp(0.0, 1.0);
        match self.stops.as_slice() {
            [] => Rgb {
                red: 0.0,
                green: 0.0,
                blue: 0.0,
            },
            [only] => *only,
            stops => {
                #[allow(
                    clippy::cast_precision_loss,
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "a handful of stops"
                )]
                let (segment, amount) = {
                    let scaled = position * (stops.len() - 1) as f64;
                    let segment = (scaled.floor() as usize).min(stops.len() - 2);
                    (segment, scaled - segment as f64)
                };
                stops[segment].mix(stops[segment + 1], amount)
            }
        }
    }
}

/// Parsed gradients keyed by their stored string. Lives as long as the caller
/// wants it to, usually one request.
#[derive(Debug, Default)]
pub struct GradientCache {
    gradients: HashMap<String, Gradient>,
}

impl GradientCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, input: &str) -> Result<&Gradient, ReconcileError> {
        if !self.gradients.contains_key(input) {
            trace!("parsing gradient {input:?}");
            let gradient = Gradient::parse(input)?;
            self.gradients.insert(input.to_owned(), gradient);
        }
        Ok(&self.gradients[input])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gradients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gradients.is_empty()
    }
}

/// Where along its category gradient each of `count` shifts sits.
///
/// Small groups deliberately don't span the whole gradient: a lone shift sits
/// at 0.7, two shifts at 0.4 and 0.7, three between 0.2 and 0.8.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "shift counts are small")]
pub fn gradient_positions(count: usize) -> Vec<f64> {
    let (start, end): (f64, f64) = match count {
        0 => return Vec::new(),
        1 => return vec![0.7],
        2 => (0.4, 0.7),
        3 => (0.2, 0.8),
        _ => (0.0, 1.0),
    };
    let last = (count - 1) as f64;
    (0..count)
        .map(|index| (end - start).mul_add(index as f64 / last, start))
        .collect()
}
