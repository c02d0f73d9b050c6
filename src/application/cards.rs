//! Mapping from content records to the card views shared by listing and detail pages.

use time::{Date, macros::format_description};

use crate::domain::entities::{BlogPost, Project, Tutorial};
use crate::presentation::views::{LinkView, PostCard, ProjectCard, TutorialCard};

pub fn project_href(slug: &str) -> String {
    format!("/projects/{slug}")
}

pub fn post_href(slug: &str) -> String {
    format!("/blog/{slug}")
}

pub fn tutorial_href(slug: &str) -> String {
    format!("/tutorials/{slug}")
}

pub fn project_card(project: &Project) -> ProjectCard {
    ProjectCard {
        href: project_href(&project.slug),
        title: project.title.clone(),
        summary: project.summary.clone(),
        category: project.category.clone(),
        stack: project.stack.clone(),
        metrics: project.metrics.clone(),
        links: project
            .links
            .iter()
            .map(|link| LinkView {
                label: link.label.clone(),
                url: link.url.clone(),
                kind: link.kind.as_str(),
            })
            .collect(),
        thumbnail: project.thumbnail.clone(),
    }
}

/// Compact project card: at most `metrics` metrics and `stack` stack entries.
pub fn project_teaser(project: &Project, metrics: usize, stack: usize) -> ProjectCard {
    let mut card = project_card(project);
    card.metrics.truncate(metrics);
    card.stack.truncate(stack);
    card
}

pub fn post_card(post: &BlogPost) -> PostCard {
    PostCard {
        href: post_href(&post.slug),
        title: post.title.clone(),
        excerpt: post.excerpt.clone(),
        category: post.category.as_str(),
        category_token: post.category.css_token(),
        iso_date: iso_date(post.date),
        published: display_date(post.date),
        read_time: post.read_time.clone(),
        tags: post.tags.clone(),
    }
}

pub fn tutorial_card(tutorial: &Tutorial) -> TutorialCard {
    TutorialCard {
        href: tutorial_href(&tutorial.slug),
        title: tutorial.title.clone(),
        description: tutorial.description.clone(),
        category: tutorial.category.as_str(),
        category_token: tutorial.category.css_token(),
        difficulty: tutorial.difficulty.as_str(),
        duration: tutorial.duration.clone(),
        topics: tutorial.topics.clone(),
    }
}

fn iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// `Dec 20, 2025`
fn display_date(date: Date) -> String {
    date.format(format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| iso_date(date))
}
