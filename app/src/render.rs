//! Plain-text screens for the terminal.

use std::fmt;

use bookmarks::BookmarkStore;
use common::JobRecord;
use feed::PageState;

const MISSING: &str = "-";

fn marker(bookmarked: bool) -> &'static str {
    if bookmarked { "[*]" } else { "[ ]" }
}

/// One list entry: title, company, place, salary, phone and thumbnail.
pub struct JobCard<'a> {
    pub job: &'a JobRecord,
    pub bookmarked: bool,
}

impl fmt::Display for JobCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let job = self.job;
        writeln!(f, "{} {} (#{})", marker(self.bookmarked), job.title, job.id)?;
        writeln!(f, "    Company: {}", job.company_name)?;
        writeln!(
            f,
            "    Place:   {}",
            job.detail("Place").as_deref().unwrap_or(MISSING)
        )?;
        writeln!(
            f,
            "    Salary:  {}",
            job.detail("Salary").as_deref().unwrap_or(MISSING)
        )?;
        writeln!(
            f,
            "    Phone:   {}",
            job.whatsapp_no.as_deref().unwrap_or(MISSING)
        )?;
        writeln!(f, "    Image:   {}", job.thumbnail().unwrap_or("(placeholder)"))
    }
}

/// The jobs tab after the last load settled.
pub struct FeedScreen<'a> {
    pub state: &'a PageState,
    pub bookmarks: &'a BookmarkStore,
}

impl fmt::Display for FeedScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        if let Some(error) = &state.error {
            writeln!(f, "{error}")?;
            return writeln!(f, "Run `jobs refresh` to try again.");
        }
        if state.jobs.is_empty() {
            writeln!(f, "No jobs found")?;
            return writeln!(f, "Run `jobs refresh` to refresh.");
        }

        for job in &state.jobs {
            let card = JobCard {
                job,
                bookmarked: self.bookmarks.is_bookmarked(job.id),
            };
            writeln!(f, "{card}")?;
        }
        if state.has_more() {
            writeln!(
                f,
                "-- page {}, more with `jobs browse --pages {}` --",
                state.page,
                state.page + 1
            )
        } else {
            writeln!(f, "-- end of feed --")
        }
    }
}

/// The bookmarks tab.
pub struct BookmarksScreen<'a> {
    pub jobs: &'a [JobRecord],
}

impl fmt::Display for BookmarksScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.jobs.is_empty() {
            writeln!(f, "No bookmarked jobs")?;
            return writeln!(f, "Jobs you bookmark will appear here");
        }
        for job in self.jobs {
            writeln!(f, "{}", JobCard { job, bookmarked: true })?;
        }
        Ok(())
    }
}

/// Full detail view of a single job.
pub struct JobDetails<'a> {
    pub job: &'a JobRecord,
    pub bookmarked: bool,
}

impl fmt::Display for JobDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let job = self.job;
        writeln!(f, "{} (#{})", job.title, job.id)?;
        writeln!(f, "{}", job.company_name)?;
        writeln!(f, "Bookmarked: {}", if self.bookmarked { "yes" } else { "no" })?;
        writeln!(
            f,
            "Contact: {}",
            job.whatsapp_no.as_deref().unwrap_or(MISSING)
        )?;

        if !job.primary_details.is_empty() {
            writeln!(f, "Details:")?;
            for key in job.primary_details.keys() {
                let value = job.detail(key);
                writeln!(
                    f,
                    "  {}: {}",
                    key.replace('_', " "),
                    value.as_deref().unwrap_or(MISSING)
                )?;
            }
        }

        if !job.creatives.is_empty() {
            writeln!(f, "Images:")?;
            for creative in &job.creatives {
                match &creative.file {
                    Some(file) => writeln!(f, "  {} ({file})", creative.thumb_url)?,
                    None => writeln!(f, "  {}", creative.thumb_url)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bookmarks::MemoryStore;
    use common::Creative;
    use feed::FETCH_ERROR_MESSAGE;
    use serde_json::json;

    use super::*;

    fn sample_job() -> JobRecord {
        let mut job = JobRecord::new(11, "Delivery Partner", "QuickShip");
        job.primary_details.insert("Place".into(), json!("Indore"));
        job.primary_details.insert("Fees_Charged".into(), json!("0"));
        job.whatsapp_no = Some("9999999999".into());
        job.creatives.push(Creative {
            thumb_url: "https://cdn.test/t.jpg".into(),
            file: Some("https://cdn.test/f.jpg".into()),
            creative_type: Some("1".into()),
        });
        job
    }

    #[test]
    fn test_card_fills_missing_fields() {
        let job = JobRecord::new(3, "Cook", "Diner");
        let card = JobCard {
            job: &job,
            bookmarked: false,
        }
        .to_string();

        assert!(card.starts_with("[ ] Cook (#3)"));
        assert!(card.contains("Salary:  -"));
        assert!(card.contains("(placeholder)"));
    }

    #[test]
    fn test_card_marks_bookmarks() {
        let job = sample_job();
        let card = JobCard {
            job: &job,
            bookmarked: true,
        }
        .to_string();

        assert!(card.starts_with("[*] Delivery Partner (#11)"));
        assert!(card.contains("Place:   Indore"));
        assert!(card.contains("https://cdn.test/t.jpg"));
    }

    #[test]
    fn test_feed_screen_shows_error_instead_of_jobs() {
        let bookmarks = BookmarkStore::new(Arc::new(MemoryStore::new()), "k");
        let state = PageState {
            jobs: vec![sample_job()],
            error: Some(FETCH_ERROR_MESSAGE.to_string()),
            ..PageState::default()
        };

        let screen = FeedScreen {
            state: &state,
            bookmarks: &bookmarks,
        }
        .to_string();

        assert!(screen.starts_with(FETCH_ERROR_MESSAGE));
        assert!(!screen.contains("Delivery Partner"));
    }

    #[test]
    fn test_feed_screen_empty_and_exhausted() {
        let bookmarks = BookmarkStore::new(Arc::new(MemoryStore::new()), "k");
        let empty = PageState::default();
        let screen = FeedScreen {
            state: &empty,
            bookmarks: &bookmarks,
        }
        .to_string();
        assert!(screen.starts_with("No jobs found"));

        let done = PageState {
            jobs: vec![sample_job()],
            exhausted: true,
            ..PageState::default()
        };
        let screen = FeedScreen {
            state: &done,
            bookmarks: &bookmarks,
        }
        .to_string();
        assert!(screen.contains("-- end of feed --"));
    }

    #[test]
    fn test_bookmarks_screen_when_empty() {
        let screen = BookmarksScreen { jobs: &[] }.to_string();
        assert!(screen.starts_with("No bookmarked jobs"));
    }

    #[test]
    fn test_details_list_every_primary_detail() {
        let job = sample_job();
        let details = JobDetails {
            job: &job,
            bookmarked: false,
        }
        .to_string();

        assert!(details.contains("Fees Charged: 0"));
        assert!(details.contains("Place: Indore"));
        assert!(details.contains("Bookmarked: no"));
        assert!(details.contains("https://cdn.test/t.jpg (https://cdn.test/f.jpg)"));
    }
}
