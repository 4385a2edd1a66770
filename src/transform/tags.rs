//! Turning solved parameters into override tag edits.

use std::fmt;

use crate::foundation::core::Point;
use crate::transform::params::{StyleDefaults, TransformParams};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
/// One change to a line's first override block.
pub enum TagEdit {
    /// Replace the tag (and any tag it supersedes) with `tag` + `value`.
    Set { tag: &'static str, value: String },
    /// Drop the tag so the style default applies.
    Remove { tag: &'static str },
}

impl TagEdit {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Set { tag, .. } | Self::Remove { tag } => *tag,
        }
    }

    /// Literal override text for a set, e.g. `\fscx120.00`.
    pub fn override_text(&self) -> Option<String> {
        match self {
            Self::Set { tag, value } => Some(format!("{tag}{value}")),
            Self::Remove { .. } => None,
        }
    }
}

impl fmt::Display for TagEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { tag, value } => write!(f, "{tag}{value}"),
            Self::Remove { tag } => write!(f, "-{tag}"),
        }
    }
}

/// Edits that write `params` onto a line of the given style.
///
/// Values that format identically to their default are removed instead of set.
/// `\bord` and `\shad` are always dropped in favor of the per-axis tags, and `\org`
/// and `\pos` are always written.
pub fn emit(params: &TransformParams, style: &StyleDefaults) -> Vec<TagEdit> {
    let org = params.origin();
    vec![
        scalar("\\fax", params.fax, 6, 0.0),
        scalar("\\fay", 0.0, 6, 0.0),
        scalar("\\fscx", params.fsc.x, 2, style.scale.x),
        scalar("\\fscy", params.fsc.y, 2, style.scale.y),
        scalar("\\frz", params.angle_z, 4, style.angle),
        scalar("\\frx", params.angle_x, 4, 0.0),
        scalar("\\fry", params.angle_y, 4, 0.0),
        TagEdit::Remove { tag: "\\bord" },
        TagEdit::Remove { tag: "\\shad" },
        scalar("\\xbord", params.bord.x, 2, style.outline),
        scalar("\\ybord", params.bord.y, 2, style.outline),
        scalar("\\xshad", params.shad.x, 2, style.shadow),
        scalar("\\yshad", params.shad.y, 2, style.shadow),
        TagEdit::Set {
            tag: "\\org",
            value: point_str(org),
        },
        TagEdit::Set {
            tag: "\\pos",
            value: point_str(params.pos),
        },
    ]
}

/// Concatenate the set edits into one override block.
pub fn override_block(edits: &[TagEdit]) -> String {
    let body: String = edits.iter().filter_map(TagEdit::override_text).collect();
    format!("{{{body}}}")
}

fn scalar(tag: &'static str, value: f64, precision: usize, default: f64) -> TagEdit {
    let formatted = format!("{value:.precision$}");
    let default_formatted = format!("{default:.precision$}");
    let negated_matches = default == 0.0 && format!("{:.precision$}", -value) == default_formatted;
    if formatted == default_formatted || negated_matches {
        TagEdit::Remove { tag }
    } else {
        TagEdit::Set {
            tag,
            value: formatted,
        }
    }
}

/// `(x,y)` with at most two decimals and no trailing zeros.
fn point_str(p: Point) -> String {
    format!("({},{})", trim_decimal(p.x, 2), trim_decimal(p.y, 2))
}

pub(crate) fn trim_decimal(value: f64, precision: usize) -> String {
    let s = format!("{value:.precision$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/tags.rs"]
mod tests;
