// Output formatting utilities

use chrono::{DateTime, NaiveDate, Utc};
use std::io::IsTerminal;
use crate::models::{Review, User};
use crate::overview::{EntityIndex, UNKNOWN_USER};
use crate::utils::format_relative_due;
use crate::views::{ProjectCard, ReviewLine, ReviewsOverview, SubmissionRow};

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";

const MAX_RATING: i32 = 5;

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate for reliable detection, with fallback to
/// COLUMNS environment variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// Apply bold formatting if in TTY mode
pub fn bold_if_tty(text: &str, is_tty: bool) -> String {
    paint(text, ANSI_BOLD, is_tty)
}

fn paint(text: &str, code: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", code, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

fn separator(width: usize) -> String {
    "-".repeat(width.clamp(20, 80))
}

/// Five-star rendering of a rating; out-of-range ratings are clamped
pub fn render_stars(rating: i32) -> String {
    let filled = rating.clamp(0, MAX_RATING) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(MAX_RATING as usize - filled))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

fn due_color(due: NaiveDate, today: NaiveDate) -> &'static str {
    let days = (due - today).num_days();
    if days < 0 {
        ANSI_FG_RED
    } else if days <= 2 {
        ANSI_FG_YELLOW
    } else {
        ANSI_FG_GREEN
    }
}

/// Admin dashboard: one block per project card
pub fn format_project_cards(cards: &[ProjectCard], today: NaiveDate, width: usize, is_tty: bool) -> String {
    if cards.is_empty() {
        return "No projects found.\n".to_string();
    }

    let mut output = String::new();
    for card in cards {
        let due = format!(
            "due {} ({})",
            format_date(card.due_date),
            format_relative_due(card.due_date, today)
        );
        output.push_str(&format!(
            "{} {} [{}] {}\n",
            bold_if_tty(&format!("[{}]", card.id), is_tty),
            bold_if_tty(&card.title, is_tty),
            card.status.as_str(),
            paint(&due, due_color(card.due_date, today), is_tty),
        ));
        output.push_str(&format!("    {}\n", card.description));

        let students = if card.students.is_empty() {
            paint("none", ANSI_FG_BRIGHT_BLACK, is_tty)
        } else {
            card.students.join(", ")
        };
        output.push_str(&format!("    Students: {}\n", students));
        output.push_str(&format!(
            "    Reviews: {}  Submissions: {}\n",
            card.review_count, card.submission_count
        ));
        output.push_str(&separator(width));
        output.push('\n');
    }
    output
}

/// Submissions view for one project
pub fn format_submission_rows(title: &str, rows: &[SubmissionRow], is_tty: bool) -> String {
    let mut output = format!("{}\n", bold_if_tty(&format!("Submissions for {}", title), is_tty));
    if rows.is_empty() {
        output.push_str("No submissions yet.\n");
        return output;
    }

    output.push_str(&format!("{:<6} {:<24} {:<10} {:<16} {}\n", "ID", "Student", "Status", "Submitted", "Content"));
    output.push_str(&format!("{}\n", "-".repeat(72)));
    for row in rows {
        output.push_str(&format!(
            "{:<6} {:<24} {:<10} {:<16} {}\n",
            row.id,
            row.student,
            row.status.as_str(),
            format_timestamp(row.submitted_at),
            row.content,
        ));
    }
    output
}

pub fn format_user_table(users: &[&User]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }

    let mut output = format!("{:<6} {:<30} {:<10}\n", "ID", "Name", "Role");
    output.push_str(&format!("{}\n", "-".repeat(46)));
    for user in users {
        output.push_str(&format!("{:<6} {:<30} {:<10}\n", user.id, user.name, user.role.as_str()));
    }
    output
}

/// Flat review listing with names resolved against `users`
pub fn format_review_table(reviews: &[Review], users: &[User]) -> String {
    if reviews.is_empty() {
        return "No reviews found.\n".to_string();
    }

    let names = EntityIndex::new(users);
    let mut output = format!(
        "{:<6} {:<24} {:<20} {:<20} {:<8} {}\n",
        "ID", "Project", "Reviewer", "Reviewee", "Rating", "Submitted"
    );
    output.push_str(&format!("{}\n", "-".repeat(96)));
    for review in reviews {
        let project = review
            .project
            .as_ref()
            .map(|p| p.title.as_str())
            .unwrap_or("?");
        output.push_str(&format!(
            "{:<6} {:<24} {:<20} {:<20} {:<8} {}\n",
            review.id,
            project,
            names.get(Some(review.reviewer_id)).name_or(UNKNOWN_USER),
            names.get(Some(review.reviewee_id)).name_or(UNKNOWN_USER),
            format!("{}/{}", review.rating, MAX_RATING),
            format_timestamp(review.submitted_at),
        ));
    }
    output
}

fn format_review_line(prefix: &str, line: &ReviewLine, is_tty: bool) -> String {
    let mut output = format!(
        "  {}: {}  {} ({}/{})  {}\n",
        prefix,
        line.counterpart,
        paint(&render_stars(line.rating), ANSI_FG_YELLOW, is_tty),
        line.rating,
        MAX_RATING,
        format_timestamp(line.submitted_at),
    );
    if !line.comment.trim().is_empty() {
        output.push_str(&format!("    \"{}\"\n", line.comment.trim()));
    }
    output
}

/// Student dashboard for one user
pub fn format_reviews_overview(user_name: &str, overview: &ReviewsOverview, is_tty: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{}\n\n",
        bold_if_tty(&format!("Reviews for {} (user {})", user_name, overview.user_id), is_tty)
    ));

    output.push_str("=== Assigned Projects ===\n");
    if overview.projects.is_empty() {
        output.push_str("No assigned projects.\n");
    } else {
        for project in &overview.projects {
            output.push_str(&format!(
                "[{}] {}  due {}\n    {}\n",
                project.id,
                project.title,
                format_date(project.due_date),
                project.preview,
            ));
        }
    }
    output.push('\n');

    let stats = &overview.stats;
    output.push_str("=== Statistics ===\n");
    output.push_str(&format!("Projects assigned: {}\n", stats.projects_assigned));
    output.push_str(&format!("Reviews given: {}\n", stats.reviews_given));
    output.push_str(&format!("Reviews received: {}\n", stats.reviews_received));
    if let Some(average) = stats.average_rating {
        output.push_str(&format!(
            "Average rating: {:.1} {}\n",
            average,
            paint(&render_stars(average.round() as i32), ANSI_FG_YELLOW, is_tty)
        ));
    }

    if overview.sections.is_empty() {
        output.push_str("\nNo reviews yet.\n");
    }
    for section in &overview.sections {
        output.push('\n');
        output.push_str(&format!("=== {} ===\n", bold_if_tty(&section.title, is_tty)));
        if !section.given.is_empty() {
            output.push_str("Given:\n");
            for line in &section.given {
                output.push_str(&format_review_line("To", line, is_tty));
            }
        }
        if !section.received.is_empty() {
            output.push_str("Received:\n");
            for line in &section.received {
                output.push_str(&format_review_line("From", line, is_tty));
            }
        }
    }
    output
}
