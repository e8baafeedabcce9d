use std::sync::LazyLock;

use regex::Regex;

static SCHEME: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^(?i)[a-z][a-z0-9+.\-]*://").ok());
static OPAQUE_SCHEME: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^(?i)(about|data|file|javascript|mailto):").ok());
static HOST_LIKE: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(r"^(?i)(localhost|[a-z0-9\-]+(\.[a-z0-9\-]+)*\.[a-z]{2,}|\d{1,3}(\.\d{1,3}){3})(:\d+)?([/?#]\S*)?$")
		.ok()
});

pub fn has_scheme(text: &str) -> bool {
	let text = text.trim();

	matches_pattern(&SCHEME, text) || matches_pattern(&OPAQUE_SCHEME, text)
}

/// Heuristic used to tell a typed address apart from a search phrase.
pub fn looks_like_url(text: &str) -> bool {
	let text = text.trim();

	if text.is_empty() || text.chars().any(char::is_whitespace) {
		return false;
	}

	has_scheme(text) || matches_pattern(&HOST_LIKE, text)
}

pub fn url_without_scheme(url: &str) -> &str {
	let trimmed = url.trim();

	match trimmed.find("://") {
		Some(idx) if has_scheme(trimmed) => &trimmed[idx + 3..],
		_ => trimmed,
	}
}

/// Case-insensitive dedup key: no scheme, no `www.`, no fragment, no trailing slash.
pub fn canonical_url_key(url: &str) -> String {
	let without_scheme = url_without_scheme(url);
	let without_fragment = match without_scheme.find('#') {
		Some(idx) => &without_scheme[..idx],
		None => without_scheme,
	};
	let lowered = without_fragment.to_lowercase();
	let host_first = lowered.strip_prefix("www.").unwrap_or(&lowered);

	host_first.trim_end_matches('/').to_string()
}

/// The part of a URL a typed fragment is compared against: no scheme and no `www.` unless
/// the fragment itself starts with one.
pub fn comparable_to<'a>(url: &'a str, fragment: &str) -> &'a str {
	if has_scheme(fragment) {
		return url.trim();
	}

	let bare = url_without_scheme(url);

	if fragment.get(..4).is_some_and(|head| head.eq_ignore_ascii_case("www.")) {
		return bare;
	}

	match bare.get(..4) {
		Some(head) if head.eq_ignore_ascii_case("www.") => &bare[4..],
		_ => bare,
	}
}

fn matches_pattern(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
	pattern.as_ref().map(|re| re.is_match(text)).unwrap_or(false)
}
