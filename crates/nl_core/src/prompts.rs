//! Prompt templates sent to the generative model.

use crate::types::Article;

/// How many sorted articles feed the timeline context.
pub const TIMELINE_ARTICLE_LIMIT: usize = 10;

/// How many events the model is asked for.
pub const TIMELINE_EVENT_COUNT: usize = 5;

pub fn summary_prompt(text: &str) -> String {
    format!(
        "Summarize the following news article into a concise 100-word digest: {}",
        text
    )
}

pub fn timeline_prompt(context: &str) -> String {
    format!(
        "Based on the following news articles, create a timeline of the top {} key events. \
         For each event, provide the date and a single, concise sentence. \
         Format the output as a JSON object with a key called 'timeline', which is a list of events. \
         Each event should have 'date' and 'event' keys. Here is the context:\n\n{}",
        TIMELINE_EVENT_COUNT, context
    )
}

/// `Title:`/`Description:` blocks for the first articles that carry both.
pub fn timeline_context(articles: &[Article]) -> String {
    let mut context = String::new();
    for article in articles.iter().take(TIMELINE_ARTICLE_LIMIT) {
        if let (Some(title), Some(description)) = (article.title(), article.description()) {
            context.push_str(&format!("Title: {}\nDescription: {}\n\n", title, description));
        }
    }
    context
}
