use super::ui;
use crate::core::{Article, NewsProvider};
use anyhow::{Result, anyhow};
use comfy_table::Cell;
use futures::future::join_all;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug)]
pub struct NewsFeed {
    pub name: String,
    pub articles: Result<Vec<Article>>,
}

/// Loads every feed concurrently; fails only when none of them answered.
pub async fn load(providers: &[Arc<dyn NewsProvider>], limit: usize) -> Result<Vec<NewsFeed>> {
    let feeds = join_all(providers.iter().map(|provider| async move {
        NewsFeed {
            name: provider.name().to_string(),
            articles: provider.load_news(limit).await,
        }
    }))
    .await;

    for feed in &feeds {
        if let Err(e) = &feed.articles {
            warn!(feed = %feed.name, error = %e, "News feed unavailable");
        }
    }

    if !feeds.is_empty() && feeds.iter().all(|f| f.articles.is_err()) {
        return Err(anyhow!("All news feeds failed"));
    }
    Ok(feeds)
}

fn display_feed(feed: &NewsFeed) -> String {
    let mut output = format!("{}\n", ui::style_text(&feed.name, ui::StyleType::Title));

    let articles = match &feed.articles {
        Ok(articles) if articles.is_empty() => {
            output.push_str(&ui::style_text("No articles", ui::StyleType::Subtle));
            return output;
        }
        Ok(articles) => articles,
        Err(e) => {
            output.push_str(&ui::style_text(
                &format!("Unavailable: {e}"),
                ui::StyleType::Error,
            ));
            return output;
        }
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Headline"), ui::header_cell("Source")]);
    for article in articles {
        let mut headline = article.title.clone();
        if !article.snippet.is_empty() {
            headline.push('\n');
            headline.push_str(&ui::style_text(&article.snippet, ui::StyleType::Subtle));
        }
        headline.push('\n');
        headline.push_str(&article.url);
        table.add_row(vec![Cell::new(headline), Cell::new(&article.source)]);
    }
    output.push_str(&table.to_string());
    output
}

pub fn display(feeds: &[NewsFeed]) -> String {
    feeds
        .iter()
        .map(display_feed)
        .collect::<Vec<_>>()
        .join("\n\n")
}
