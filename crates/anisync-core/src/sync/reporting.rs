//! Human-readable diff and sync reports

use std::fmt::Write;

use chrono::Local;

use super::SyncResult;
use crate::comparison::{Diff, EntryDiff};

/// Diff report printer
pub struct DiffReporter;

impl DiffReporter {
    /// Render one line per target entry, field details, then totals
    #[must_use]
    pub fn render(diff: &Diff, reference_account: &str) -> String {
        let mut output = String::new();

        for entry in &diff.up_to_date {
            let _ = writeln!(output, "(===) {:>7} \t{}", entry.id, entry.title);
        }
        for entry_diff in &diff.uncertain {
            let _ = writeln!(
                output,
                "( < ) {:>7} \t{}",
                entry_diff.entry.id, entry_diff.entry.title
            );
            Self::render_fields(&mut output, entry_diff);
        }
        for entry in &diff.missing {
            let _ = writeln!(output, "(---) {:>7} \t{}", entry.id, entry.title);
        }
        for entry_diff in &diff.need_update {
            let _ = writeln!(
                output,
                "(<<<) {:>7} \t{}",
                entry_diff.entry.id, entry_diff.entry.title
            );
            Self::render_fields(&mut output, entry_diff);
        }

        output.push('\n');
        let _ = writeln!(output, "Target entries: {}", diff.target.len());
        let _ = writeln!(output, "Reference entries: {}", diff.reference.len());
        let _ = writeln!(output, "(===) Up to date: {}", diff.up_to_date.len());
        let _ = writeln!(output, "( < ) Okay: {}", diff.uncertain.len());
        let _ = writeln!(output, "(---) Missing: {}", diff.missing.len());
        let _ = writeln!(output, "(<<<) Need update: {}", diff.need_update.len());
        output.push_str("After this operation, there will be:\n");
        let _ = writeln!(
            output,
            "{} updated and {} newly added entries on reference account {reference_account:?}.",
            diff.need_update.len(),
            diff.missing.len()
        );

        output
    }

    fn render_fields(output: &mut String, entry_diff: &EntryDiff) {
        if let Some(status) = &entry_diff.status {
            let _ = writeln!(
                output,
                "\t\t|-> Status: got {}, want {}",
                status.got, status.want
            );
        }
        if let Some(episodes) = &entry_diff.episodes_watched {
            let _ = writeln!(
                output,
                "\t\t|-> EpisodesWatched: got {}, want {}",
                episodes.got, episodes.want
            );
        }
        if let Some(rating) = &entry_diff.rating {
            let _ = writeln!(
                output,
                "\t\t|-> Rating: got {}, want {}",
                rating.got, rating.want
            );
        }
        if let Some(rewatching) = &entry_diff.rewatching {
            let _ = writeln!(
                output,
                "\t\t|-> Rewatching: got {}, want {}",
                rewatching.got, rewatching.want
            );
        }
        if let Some(last_updated) = &entry_diff.last_updated {
            let _ = writeln!(
                output,
                "\t\t|-> LastUpdated: got {}, want {}",
                last_updated.got.with_timezone(&Local),
                last_updated.want.with_timezone(&Local)
            );
        }
    }
}

/// Sync operation reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(result: &SyncResult) -> String {
        let mut output = String::new();

        output.push_str("\n=== Sync Summary ===\n");
        let _ = writeln!(output, "Added:    {}", result.adds.len());
        let _ = writeln!(output, "Updated:  {}", result.updates.len());

        if !result.update_fails.is_empty() {
            let _ = writeln!(output, "\nFailed to update ({}):", result.update_fails.len());
            for (i, fail) in result.update_fails.iter().enumerate() {
                let entry = &fail.diff.entry;
                let _ = writeln!(
                    output,
                    "  #{} {} {}: {}",
                    i + 1,
                    entry.id,
                    entry.title,
                    fail.reason
                );
            }
        }

        if !result.add_fails.is_empty() {
            let _ = writeln!(output, "\nFailed to add ({}):", result.add_fails.len());
            for (i, fail) in result.add_fails.iter().enumerate() {
                let _ = writeln!(
                    output,
                    "  #{} {} {}: {}",
                    i + 1,
                    fail.entry.id,
                    fail.entry.title,
                    fail.reason
                );
            }
        }

        let _ = writeln!(output, "\nTotal operations: {}", result.total_operations());

        if result.is_success() {
            output.push_str("Status: ✓ Success\n");
        } else {
            output.push_str("Status: ✗ Completed with errors\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::{FieldDiff, compare};
    use crate::entry::{Entry, Rating, Status};

    fn anime(id: u32) -> Entry {
        Entry {
            id,
            title: format!("Anime{id}"),
            ..Entry::default()
        }
    }

    #[test]
    fn test_render_markers_and_totals() {
        let reference = vec![
            anime(1),
            Entry {
                rating: Rating::from("3.0"),
                ..anime(2)
            },
        ];
        let target = vec![
            anime(1),
            Entry {
                rating: Rating::from("4.0"),
                ..anime(2)
            },
            anime(3),
        ];

        let report = DiffReporter::render(&compare(&reference, &target), "fan");

        assert!(report.contains("(===)       1 \tAnime1\n"));
        assert!(report.contains("(<<<)       2 \tAnime2\n"));
        assert!(report.contains("\t\t|-> Rating: got 3.0, want 4.0\n"));
        assert!(report.contains("(---)       3 \tAnime3\n"));
        assert!(report.contains("Target entries: 3\n"));
        assert!(report.contains("Reference entries: 2\n"));
        assert!(report.contains("(<<<) Need update: 1\n"));
        assert!(report.contains("1 updated and 1 newly added entries on reference account \"fan\"."));
    }

    #[test]
    fn test_render_uncertain_details() {
        let now = chrono::Utc::now();
        let diff = Diff {
            uncertain: vec![EntryDiff {
                entry: anime(4),
                last_updated: Some(FieldDiff {
                    got: now - chrono::Duration::days(1),
                    want: now,
                }),
                ..EntryDiff::default()
            }],
            ..Diff::default()
        };

        let report = DiffReporter::render(&diff, "fan");

        assert!(report.contains("( < )       4 \tAnime4\n"));
        assert!(report.contains("|-> LastUpdated: got "));
        assert!(report.contains("( < ) Okay: 1\n"));
    }

    #[test]
    fn test_render_status_and_rewatching() {
        let diff = Diff {
            need_update: vec![EntryDiff {
                entry: anime(5),
                status: Some(FieldDiff {
                    got: Status::Current,
                    want: Status::OnHold,
                }),
                rewatching: Some(FieldDiff {
                    got: false,
                    want: true,
                }),
                episodes_watched: Some(FieldDiff { got: 1, want: 3 }),
                ..EntryDiff::default()
            }],
            ..Diff::default()
        };

        let report = DiffReporter::render(&diff, "fan");

        assert!(report.contains("|-> Status: got current, want on-hold\n"));
        assert!(report.contains("|-> EpisodesWatched: got 1, want 3\n"));
        assert!(report.contains("|-> Rewatching: got false, want true\n"));
    }
}
