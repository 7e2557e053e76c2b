//! Blog commands: `blog` and the `post` family.

use super::result::{CommandOutput, Directive};
use crate::backend::Backend;
use crate::config::{BLOG_URL, POST_SUBCOMMANDS};
use crate::core::error::BackendError;
use crate::models::{NewPost, Post};
use crate::utils::{short_date, slugify};

pub async fn blog<B: Backend>(backend: &B) -> CommandOutput {
    let posts = match backend.published_posts().await {
        Ok(posts) => posts,
        Err(e) => return CommandOutput::Text(format!("Error fetching blog posts: {}", e)),
    };
    if posts.is_empty() {
        return CommandOutput::text("No blog posts have been published yet. Check back soon!");
    }

    let list: Vec<String> = posts
        .iter()
        .map(|p| {
            let date = p.published_at.as_ref().map_or_else(|| "N/A".to_string(), short_date);
            format!(
                "  - {}: {} (view with 'post show {}'){}",
                date,
                p.title,
                p.slug,
                p.tags_suffix()
            )
        })
        .collect();

    CommandOutput::Text(format!(
        "Latest Blog Posts:\n{}\n\nOr view all posts on the website: {}",
        list.join("\n"),
        BLOG_URL
    ))
}

fn not_found(slug: &str) -> CommandOutput {
    CommandOutput::Text(format!("Error: Post with slug '{}' not found.", slug))
}

fn not_admin(action: &str) -> CommandOutput {
    CommandOutput::Text(format!(
        "Error: You do not have permission to {} posts. Are you an admin?",
        action
    ))
}

/// `post <subcommand> [...]`. Everything except `show` needs a session.
pub async fn post<B: Backend>(args: &[String], backend: &B) -> CommandOutput {
    let (sub, rest) = match args.split_first() {
        Some((sub, rest)) => (sub.as_str(), rest),
        None => ("", args),
    };

    let Some(user) = backend.current_user().await else {
        if sub == "show" {
            return show(rest, backend, false).await;
        }
        return CommandOutput::text("You must be logged in to manage posts.");
    };

    match sub {
        "new" => {
            let title = rest.join(" ");
            if title.is_empty() {
                return CommandOutput::text("Usage: post new <post title>");
            }
            let slug = slugify(&title);
            if slug.is_empty() {
                return CommandOutput::Text(format!(
                    "Error: Cannot derive a slug from '{}'. Please use letters or digits.",
                    title
                ));
            }
            let draft = NewPost {
                title,
                slug: slug.clone(),
                author_id: user.id,
            };
            match backend.create_post(draft).await {
                Ok(created) => CommandOutput::Text(format!(
                    "Draft created: \"{}\"\nSlug: {}\nEdit with: post edit {}",
                    created.title, created.slug, created.slug
                )),
                Err(BackendError::PermissionDenied) => CommandOutput::text(
                    "Error: You do not have permission to create posts. Make sure you are an admin.",
                ),
                Err(BackendError::Conflict) => CommandOutput::Text(format!(
                    "Error: A post with the slug '{}' already exists. Please choose a different title.",
                    slug
                )),
                Err(e) => CommandOutput::Text(format!("Error creating post: {}", e)),
            }
        }
        "publish" => {
            let Some(slug) = rest.first() else {
                return CommandOutput::text("Usage: post publish <slug>");
            };
            match backend.publish_post(slug).await {
                Ok(published) => CommandOutput::Text(format!(
                    "Post \"{}\" published successfully!",
                    published.title
                )),
                Err(BackendError::PermissionDenied) => not_admin("publish"),
                Err(BackendError::NotFound) => not_found(slug),
                Err(e) => CommandOutput::Text(format!("Error publishing post: {}", e)),
            }
        }
        "list" => list(backend).await,
        "show" => show(rest, backend, true).await,
        "edit" => {
            let Some(slug) = rest.first() else {
                return CommandOutput::text("Usage: post edit <slug>");
            };
            match backend.find_post(slug).await {
                Ok(Some(found)) => Directive::EditEntity(found).into(),
                Ok(None) | Err(BackendError::NotFound) => not_found(slug),
                Err(BackendError::PermissionDenied) => not_admin("edit"),
                Err(e) => CommandOutput::Text(format!("Error fetching post: {}", e)),
            }
        }
        "tag" => {
            let Some((slug, tags)) = rest.split_first().filter(|(_, tags)| !tags.is_empty()) else {
                return CommandOutput::text("Usage: post tag <slug> <tag-name-1> [tag-name-2] ...");
            };
            match backend.tag_post(slug, tags).await {
                Ok(()) => CommandOutput::Text(format!(
                    "Tags [{}] added to post '{}'.",
                    tags.join(", "),
                    slug
                )),
                Err(BackendError::NotFound) => not_found(slug),
                Err(BackendError::PermissionDenied) => not_admin("tag"),
                Err(e) => CommandOutput::Text(format!("Error adding tags to post: {}", e)),
            }
        }
        "untag" => {
            let Some((slug, tags)) = rest.split_first().filter(|(_, tags)| !tags.is_empty()) else {
                return CommandOutput::text("Usage: post untag <slug> <tag-name-1> [tag-name-2] ...");
            };
            match backend.untag_post(slug, tags).await {
                Ok(0) => CommandOutput::text("No matching tags found to remove."),
                Ok(_) => CommandOutput::Text(format!("Tags removed successfully from post '{}'.", slug)),
                Err(BackendError::NotFound) => not_found(slug),
                Err(BackendError::PermissionDenied) => not_admin("untag"),
                Err(e) => CommandOutput::Text(format!("Error removing tags: {}", e)),
            }
        }
        _ => CommandOutput::Text(format!(
            "Unknown 'post' subcommand. Available: {}.",
            POST_SUBCOMMANDS.join(", ")
        )),
    }
}

async fn list<B: Backend>(backend: &B) -> CommandOutput {
    let posts = match backend.all_posts().await {
        Ok(posts) => posts,
        Err(BackendError::PermissionDenied) => {
            return CommandOutput::text(
                "Error: You do not have permission to view all posts. Are you an admin?",
            );
        }
        Err(e) => return CommandOutput::Text(format!("Error fetching posts: {}", e)),
    };
    if posts.is_empty() {
        return CommandOutput::text("No posts found. Create one with 'post new <title>'.");
    }

    let list: Vec<String> = posts
        .iter()
        .map(|p| {
            let marker = if p.is_published { "✅" } else { "📝" };
            format!("  - {} {} ({}){}", marker, p.title, p.slug, p.tags_suffix())
        })
        .collect();
    CommandOutput::Text(format!("Your Posts:\n{}", list.join("\n")))
}

/// Drafts are only shown to signed-in callers.
async fn show<B: Backend>(rest: &[String], backend: &B, signed_in: bool) -> CommandOutput {
    let Some(slug) = rest.first() else {
        return CommandOutput::text("Usage: post show <slug>");
    };

    let found = match backend.find_post(slug).await {
        Ok(found) => found,
        Err(BackendError::NotFound) => None,
        Err(e) => return CommandOutput::Text(format!("Error fetching post: {}", e)),
    };
    match found {
        Some(p) if p.is_published || signed_in => CommandOutput::Text(render_post(&p)),
        _ => not_found(slug),
    }
}

fn render_post(post: &Post) -> String {
    let tags = if post.tags.is_empty() {
        String::new()
    } else {
        format!("\nTags: {}", post.tags.join(", "))
    };
    let content = post
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("This post has no content yet.");

    format!(
        "\n{}\n====================================\n\n{}{}\n\n---\nView on site: {}/{}",
        post.title, content, tags, BLOG_URL, post.slug
    )
}
