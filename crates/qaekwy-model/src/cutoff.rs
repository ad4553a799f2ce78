//! Search-effort cutoffs.
//!
//! Leaf cutoffs describe a restart schedule on their own. Meta cutoffs
//! combine other cutoffs and are shipped under the `meta_cutoff` key
//! instead of `cutoff`.

use serde_json::Value;
use tracing::trace;

use qaekwy_core::wire::{self, WireMap};
use qaekwy_core::{ModelError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Cutoff {
    /// Always `value`.
    Constant { value: i64 },
    /// The Fibonacci sequence.
    Fibonacci,
    /// `scale * base^n`
    Geometric { scale: i64, base: f64 },
    /// `scale` times the Luby sequence.
    Luby { scale: i64 },
    /// `scale * n`
    Linear { scale: i64 },
    /// Uniform in `[min, max]`, rounded to multiples of `round`.
    Random {
        seed: i64,
        min: i64,
        max: i64,
        round: i64,
    },
    /// `number_from_first` values of `first`, then `second`.
    Appender {
        first: Box<Cutoff>,
        number_from_first: i64,
        second: Box<Cutoff>,
    },
    /// Alternates between `first` and `second`.
    Merger {
        first: Box<Cutoff>,
        second: Box<Cutoff>,
    },
    /// Each value of `sub` repeated `repeat` times.
    Repeater { sub: Box<Cutoff>, repeat: i64 },
}

impl Cutoff {
    pub fn appender(first: Cutoff, number_from_first: i64, second: Cutoff) -> Cutoff {
        Cutoff::Appender {
            first: Box::new(first),
            number_from_first,
            second: Box::new(second),
        }
    }

    pub fn merger(first: Cutoff, second: Cutoff) -> Cutoff {
        Cutoff::Merger {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn repeater(sub: Cutoff, repeat: i64) -> Cutoff {
        Cutoff::Repeater {
            sub: Box::new(sub),
            repeat,
        }
    }

    /// Wire `name` tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Cutoff::Constant { .. } => "constant",
            Cutoff::Fibonacci => "fibonacci",
            Cutoff::Geometric { .. } => "geometric",
            Cutoff::Luby { .. } => "luby",
            Cutoff::Linear { .. } => "linear",
            Cutoff::Random { .. } => "random",
            Cutoff::Appender { .. } => "appender",
            Cutoff::Merger { .. } => "merger",
            Cutoff::Repeater { .. } => "repeater",
        }
    }

    /// True for cutoffs built from other cutoffs.
    pub fn is_meta(&self) -> bool {
        matches!(
            self,
            Cutoff::Appender { .. } | Cutoff::Merger { .. } | Cutoff::Repeater { .. }
        )
    }

    /// Top-level model key this cutoff is stored under.
    pub fn model_key(&self) -> &'static str {
        if self.is_meta() {
            "meta_cutoff"
        } else {
            "cutoff"
        }
    }

    pub fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert("name".into(), Value::from(self.tag()));
        match self {
            Cutoff::Constant { value } => {
                map.insert("value".into(), Value::from(*value));
            }
            Cutoff::Fibonacci => {}
            Cutoff::Geometric { scale, base } => {
                map.insert("scale".into(), Value::from(*scale));
                map.insert("base".into(), Value::from(*base));
            }
            Cutoff::Luby { scale } | Cutoff::Linear { scale } => {
                map.insert("scale".into(), Value::from(*scale));
            }
            Cutoff::Random {
                seed,
                min,
                max,
                round,
            } => {
                map.insert("seed".into(), Value::from(*seed));
                map.insert("min".into(), Value::from(*min));
                map.insert("max".into(), Value::from(*max));
                map.insert("round".into(), Value::from(*round));
            }
            Cutoff::Appender {
                first,
                number_from_first,
                second,
            } => {
                map.insert("first_cutoff".into(), Value::Object(first.to_wire()));
                map.insert("number_from_first".into(), Value::from(*number_from_first));
                map.insert("second_cutoff".into(), Value::Object(second.to_wire()));
            }
            Cutoff::Merger { first, second } => {
                map.insert("first_cutoff".into(), Value::Object(first.to_wire()));
                map.insert("second_cutoff".into(), Value::Object(second.to_wire()));
            }
            Cutoff::Repeater { sub, repeat } => {
                map.insert("sub_cutoff".into(), Value::Object(sub.to_wire()));
                map.insert("repeat".into(), Value::from(*repeat));
            }
        }
        map
    }

    /// Dispatches on `name`; children are parsed before their parent.
    pub fn from_wire(map: &WireMap) -> Result<Cutoff> {
        let tag = wire::str_field(map, "name")?;
        let (_, deserializer) = CUTOFFS
            .iter()
            .find(|(known, _)| *known == tag)
            .ok_or_else(|| ModelError::UnknownCutoff(tag.to_string()))?;
        trace!(tag, "Deserializing cutoff");
        deserializer(map)
    }
}

type CutoffDeserializer = fn(&WireMap) -> Result<Cutoff>;

/// Every cutoff tag with its deserializer.
static CUTOFFS: &[(&str, CutoffDeserializer)] = &[
    ("constant", constant_from_wire),
    ("fibonacci", fibonacci_from_wire),
    ("geometric", geometric_from_wire),
    ("luby", luby_from_wire),
    ("linear", linear_from_wire),
    ("random", random_from_wire),
    ("appender", appender_from_wire),
    ("merger", merger_from_wire),
    ("repeater", repeater_from_wire),
];

fn child(map: &WireMap, field: &str) -> Result<Box<Cutoff>> {
    Cutoff::from_wire(wire::map_field(map, field)?).map(Box::new)
}

fn constant_from_wire(map: &WireMap) -> Result<Cutoff> {
    Ok(Cutoff::Constant {
        value: wire::i64_field(map, "value")?,
    })
}

fn fibonacci_from_wire(_map: &WireMap) -> Result<Cutoff> {
    Ok(Cutoff::Fibonacci)
}

fn geometric_from_wire(map: &WireMap) -> Result<Cutoff> {
    Ok(Cutoff::Geometric {
        scale: wire::i64_field(map, "scale")?,
        base: wire::f64_field(map, "base")?,
    })
}

fn luby_from_wire(map: &WireMap) -> Result<Cutoff> {
    Ok(Cutoff::Luby {
        scale: wire::i64_field(map, "scale")?,
    })
}

fn linear_from_wire(map: &WireMap) -> Result<Cutoff> {
    Ok(Cutoff::Linear {
        scale: wire::i64_field(map, "scale")?,
    })
}

fn random_from_wire(map: &WireMap) -> Result<Cutoff> {
    Ok(Cutoff::Random {
        seed: wire::i64_field(map, "seed")?,
        min: wire::i64_field(map, "min")?,
        max: wire::i64_field(map, "max")?,
        round: wire::i64_field(map, "round")?,
    })
}

fn appender_from_wire(map: &WireMap) -> Result<Cutoff> {
    Ok(Cutoff::Appender {
        first: child(map, "first_cutoff")?,
        number_from_first: wire::i64_field(map, "number_from_first")?,
        second: child(map, "second_cutoff")?,
    })
}

fn merger_from_wire(map: &WireMap) -> Result<Cutoff> {
    Ok(Cutoff::Merger {
        first: child(map, "first_cutoff")?,
        second: child(map, "second_cutoff")?,
    })
}

fn repeater_from_wire(map: &WireMap) -> Result<Cutoff> {
    Ok(Cutoff::Repeater {
        sub: child(map, "sub_cutoff")?,
        repeat: wire::i64_field(map, "repeat")?,
    })
}
