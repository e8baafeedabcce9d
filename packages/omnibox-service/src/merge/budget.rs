use omnibox_domain::{Candidate, SourceKind};

/// Rows reserved for search suggestions, present or still expected.
pub fn search_engine_space(available: usize, expected: bool, slots: usize, limit: usize) -> usize {
	if available == 0 && !expected {
		return 0;
	}

	let wanted = if expected { available.max(slots) } else { available };

	slots.min(wanted).min(limit)
}

/// A note worth keeping visible: it actually matched the query.
pub fn is_reserved_note(candidate: &Candidate) -> bool {
	candidate.kind() == SourceKind::Note && candidate.prefix_score() > 1.0
}

/// Number of matching notes the truncated list must keep, rounded up.
pub fn note_reserve(truncate_length: usize, ratio: f64) -> usize {
	let exact = ratio * truncate_length as f64;
	let nearest = exact.round();

	// Absorb representation error so 0.4 * 5 stays 2.
	if (exact - nearest).abs() < 1e-9 { nearest as usize } else { exact.ceil() as usize }
}

/// Truncates a descending list, then hands tail rows back to matching notes that fell past the
/// cutoff until the note reserve is met. Returns the list and the number of notes pulled back.
pub fn truncate_with_note_reserve(
	mut sortable: Vec<Candidate>,
	truncate_length: usize,
	ratio: f64,
) -> (Vec<Candidate>, usize) {
	if sortable.len() <= truncate_length {
		return (sortable, 0);
	}

	let dropped = sortable.split_off(truncate_length);
	let mut kept = sortable;
	let mut rescued: Vec<Candidate> = dropped.into_iter().filter(is_reserved_note).collect();

	if rescued.is_empty() {
		return (kept, 0);
	}

	let kept_notes = kept.iter().filter(|candidate| is_reserved_note(candidate)).count();
	let replaceable = kept.len() - kept_notes;
	let target = note_reserve(truncate_length, ratio).min(kept_notes + rescued.len());
	let pull = target.saturating_sub(kept_notes).min(replaceable);

	if pull == 0 {
		return (kept, 0);
	}

	let mut removed = 0;
	let mut at = kept.len();

	while removed < pull && at > 0 {
		at -= 1;

		if !is_reserved_note(&kept[at]) {
			kept.remove(at);

			removed += 1;
		}
	}

	rescued.truncate(pull);
	kept.extend(rescued);

	(kept, pull)
}
