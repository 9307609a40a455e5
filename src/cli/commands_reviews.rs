// Review command handlers

use anyhow::Result;
use crate::api::ReviewFilter;
use crate::models::Id;
use crate::overview::{resolve, UNKNOWN_USER};
use crate::views::ReviewsOverview;
use crate::cli::commands::CliContext;
use crate::cli::error::user_error;
use crate::cli::output::{format_review_table, format_reviews_overview, is_tty};

/// Student dashboard: assigned projects, statistics and reviews by project
pub fn handle_reviews_overview(ctx: &CliContext, user_id: Id, json: bool) -> Result<()> {
    let store = ctx.store()?;
    let users = store.list_users()?;
    let Some(user) = resolve(Some(user_id), &users).found() else {
        user_error(&format!("User {} not found", user_id));
    };

    let projects = store.list_projects()?;
    let reviews = store.list_reviews(&ReviewFilter::for_user(user_id))?;
    let overview = ReviewsOverview::build(user_id, &users, &projects, &reviews);

    if !overview.unclassified.is_empty() {
        log::warn!(
            "{} review(s) returned for user {} do not involve them: {:?}",
            overview.unclassified.len(), user_id, overview.unclassified
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        print!("{}", format_reviews_overview(&user.name, &overview, is_tty()));
    }
    Ok(())
}

pub fn handle_reviews_list(ctx: &CliContext, filter: &ReviewFilter, json: bool) -> Result<()> {
    let store = ctx.store()?;
    let reviews = store.list_reviews(filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reviews)?);
        return Ok(());
    }

    let users = store.list_users()?;
    if let Some(user_id) = filter.user_id {
        let name = resolve(Some(user_id), &users).name_or(UNKNOWN_USER);
        println!("Reviews involving {} (user {})", name, user_id);
    }
    print!("{}", format_review_table(&reviews, &users));
    Ok(())
}
