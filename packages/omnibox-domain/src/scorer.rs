//! Prefix scoring of candidate strings against the in-progress query fragment.
//!
//! Scores are computed once when a candidate is built. Two strategies exist:
//! match-inside (longest run of the fragment anywhere in the field, decaying with its offset)
//! and simple-prefix (plain common-prefix ratio, used for URL fields and note titles).

use crate::{
	source::{SourceKind, UrlFields},
	url,
};

pub const URL_FIELD_WEIGHT: f64 = 0.2;
pub const NOTE_FIELD_WEIGHT: f64 = 0.25;
pub const TEXT_FIELD_WEIGHT: f64 = 0.1;
pub const NO_INFORMATION_BOOST: f64 = 1.25;
pub const MID_STRING_DISALLOWED_FACTOR: f64 = 2.0;
pub const MAX_MATCH_OFFSET: usize = 10;
pub const OFFSET_SCORE_WEIGHT: f64 = 0.1;

/// Inputs to [`score`]. Borrowed so the builder can score before it owns the strings.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRequest<'a> {
	pub text: &'a str,
	pub information: Option<&'a str>,
	pub fragment: Option<&'a str>,
	pub kind: SourceKind,
	pub url_fields: UrlFields,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scores {
	/// Text field match ratio in `[0, 1]`.
	pub raw_text: f64,
	/// Information field match ratio in `[0, 1]`.
	pub raw_info: f64,
	pub text_boosted: f64,
	pub info_boosted: f64,
	/// `1 + text_boosted + info_boosted`.
	pub prefix: f64,
	pub take_over: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
	/// Display text, trimmed to the match when base replacement applied.
	pub text: String,
	pub information: Option<String>,
	pub scores: Scores,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldScore {
	pub raw: f64,
	pub boosted: f64,
	pub take_over: bool,
	pub replacement: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Field {
	kind: SourceKind,
	is_url: bool,
	other_field_absent: bool,
}
impl Field {
	fn can_match_inside(self) -> bool {
		!self.is_url && !self.kind.is_note_bearing()
	}

	fn weight(self) -> f64 {
		let base = if self.is_url {
			URL_FIELD_WEIGHT
		} else if self.kind.is_note_bearing() {
			NOTE_FIELD_WEIGHT
		} else {
			TEXT_FIELD_WEIGHT
		};
		let base = if self.can_match_inside() { base } else { base * MID_STRING_DISALLOWED_FACTOR };

		if self.other_field_absent { base * NO_INFORMATION_BOOST } else { base }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InnerMatch {
	start: usize,
	len: usize,
}

/// Scores both string fields of a candidate. The information field is scored first so the
/// text field knows whether it stands alone.
pub fn score(req: ScoreRequest<'_>) -> Scored {
	let information = req.information.filter(|info| !info.is_empty());
	let info = match information {
		Some(info) => score_field(
			req.fragment,
			info,
			Field {
				kind: req.kind,
				is_url: req.url_fields.contains(UrlFields::INFO),
				other_field_absent: false,
			},
		),
		None => FieldScore::default(),
	};
	let text = score_field(
		req.fragment,
		req.text,
		Field {
			kind: req.kind,
			is_url: req.url_fields.contains(UrlFields::TEXT),
			other_field_absent: information.is_none(),
		},
	);
	let scores = Scores {
		raw_text: text.raw,
		raw_info: info.raw,
		text_boosted: text.boosted,
		info_boosted: info.boosted,
		prefix: 1.0 + text.boosted + info.boosted,
		take_over: text.take_over || info.take_over,
	};

	Scored {
		text: text.replacement.unwrap_or_else(|| req.text.to_string()),
		information: req
			.information
			.map(|original| info.replacement.unwrap_or_else(|| original.to_string())),
		scores,
	}
}

fn score_field(fragment: Option<&str>, base: &str, field: Field) -> FieldScore {
	let Some(fragment) = fragment.filter(|fragment| !fragment.is_empty()) else {
		return FieldScore::default();
	};

	if base.is_empty() {
		return FieldScore::default();
	}

	if field.can_match_inside() {
		match_inside(fragment, base, field)
	} else {
		simple_prefix(fragment, base, field)
	}
}

fn match_inside(fragment: &str, base: &str, field: Field) -> FieldScore {
	let query: Vec<char> = fragment.chars().collect();
	let haystack: Vec<char> = base.chars().collect();
	let Some(found) = longest_inner_match(&haystack, &query) else {
		return FieldScore::default();
	};
	let offset = found.start.min(MAX_MATCH_OFFSET);
	let offset_score =
		OFFSET_SCORE_WEIGHT * (MAX_MATCH_OFFSET - offset) as f64 / MAX_MATCH_OFFSET as f64;
	let raw = offset_score + (1.0 - OFFSET_SCORE_WEIGHT) * found.len as f64 / query.len() as f64;
	let in_range = found.start <= MAX_MATCH_OFFSET;
	let replacement = (in_range && found.start > 0 && field.kind.allows_base_replacement())
		.then(|| haystack[found.start..].iter().collect());

	FieldScore {
		raw,
		boosted: raw * field.weight(),
		take_over: found.len == query.len() && in_range,
		replacement,
	}
}

fn simple_prefix(fragment: &str, base: &str, field: Field) -> FieldScore {
	let comparable = if field.is_url { url::comparable_to(base, fragment) } else { base };
	let query: Vec<char> = fragment.chars().collect();
	let haystack: Vec<char> = comparable.chars().collect();
	let common = common_prefix_len(&haystack, &query);
	let raw = common as f64 / query.len() as f64;
	let full_fragment = common == query.len();
	// Titles only take over on an exact match; URLs take over on any full prefix.
	let take_over = if field.is_url { full_fragment } else { full_fragment && common == haystack.len() };

	FieldScore { raw, boosted: raw * field.weight(), take_over, replacement: None }
}

fn chars_eq(a: char, b: char) -> bool {
	a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn common_prefix_len(haystack: &[char], query: &[char]) -> usize {
	haystack.iter().zip(query).take_while(|(a, b)| chars_eq(**a, **b)).count()
}

/// Longest prefix of `query` found anywhere in `haystack`, earliest occurrence on ties.
fn longest_inner_match(haystack: &[char], query: &[char]) -> Option<InnerMatch> {
	let max_len = query.len().min(haystack.len());

	(1..=max_len).rev().find_map(|len| {
		let needle = &query[..len];

		(0..=haystack.len() - len)
			.find(|&start| {
				haystack[start..start + len].iter().zip(needle).all(|(a, b)| chars_eq(*a, *b))
			})
			.map(|start| InnerMatch { start, len })
	})
}
