//! Published-article commands: browse, inspect, download, publish, retract.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use quire_api::journals::{ListQuery, ManuscriptDraft};
use quire_core::model::{FileType, Journal, ResourceKind};
use quire_core::ui::notify;
use quire_core::ui::table::Formatter;
use quire_fetch::DownloadTarget;
use tabled::Tabled;

use super::{ADMIN, CONTRIBUTORS, PUBLIC, Surface, client_for, download, explain};

const ARCHIVE: Surface = Surface {
    route: "/journals",
    guard: PUBLIC,
};

const UPLOADS: Surface = Surface {
    route: "/journals/uploads",
    guard: CONTRIBUTORS,
};

const MANAGE: Surface = Surface {
    route: "/manage-journals",
    guard: ADMIN,
};

#[derive(Debug, Args)]
pub struct JournalArgs {
    #[command(subcommand)]
    cmd: JournalCommands,
}

#[derive(Debug, Subcommand)]
enum JournalCommands {
    /// Browse published articles.
    #[command(alias = "ls")]
    List(ListArgs),
    /// Show one article in full.
    Show(ShowArgs),
    /// Download an article's file, trying every known source.
    #[command(alias = "dl")]
    Download(DownloadArgs),
    /// Publish a manuscript directly as an article.
    Submit(SubmitArgs),
    /// Retract an article.
    #[command(alias = "rm")]
    Delete(DeleteArgs),
}

impl JournalArgs {
    pub async fn run(self) -> Result<()> {
        match self.cmd {
            JournalCommands::List(args) => args.run().await,
            JournalCommands::Show(args) => args.run().await,
            JournalCommands::Download(args) => args.run().await,
            JournalCommands::Submit(args) => args.run().await,
            JournalCommands::Delete(args) => args.run().await,
        }
    }
}

#[derive(Tabled)]
struct JournalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "AUTHORS")]
    authors: String,
    #[tabled(rename = "PUBLISHED")]
    published: String,
}

impl From<&Journal> for JournalRow {
    fn from(journal: &Journal) -> Self {
        Self {
            id: journal.id.clone(),
            title: journal.title.clone(),
            authors: journal.authors.join(", "),
            published: journal
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
}

impl ListArgs {
    async fn run(self) -> Result<()> {
        let client = client_for(&ARCHIVE)?;
        let journals = client
            .journals(&ListQuery {
                page: self.page,
                limit: self.limit,
                search: self.search,
            })
            .await
            .map_err(explain)?;

        if journals.is_empty() {
            notify::info("no published articles found");
            return Ok(());
        }

        let table = Formatter::default()
            .with_footer(&format!("{} article(s)", journals.len()))
            .build(journals.iter().map(JournalRow::from));
        println!("{table}");
        Ok(())
    }
}

#[derive(Debug, Args)]
struct ShowArgs {
    id: String,
}

impl ShowArgs {
    async fn run(self) -> Result<()> {
        let client = client_for(&ARCHIVE)?;
        let journal = client.journal(&self.id).await.map_err(explain)?;

        println!("{}", style(&journal.title).bold());
        if !journal.authors.is_empty() {
            println!("{} {}", style("authors:").dim(), journal.authors.join(", "));
        }
        if let (Some(volume), Some(issue)) = (&journal.volume, &journal.issue) {
            println!("{} volume {volume}, issue {issue}", style("issue:").dim());
        }
        if !journal.keywords.is_empty() {
            println!("{} {}", style("keywords:").dim(), journal.keywords.join(", "));
        }
        if !journal.abstract_text.is_empty() {
            println!("\n{}", journal.abstract_text);
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
struct DownloadArgs {
    id: String,
    /// pdf or docx.
    #[arg(long, default_value = "pdf")]
    format: String,
    /// Directory the file is saved into.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

impl DownloadArgs {
    async fn run(self) -> Result<()> {
        let client = client_for(&ARCHIVE)?;
        let file_type: FileType = self.format.parse()?;

        let journal = client.journal(&self.id).await.map_err(explain)?;
        let mirror = match journal.mirror_url(file_type) {
            Some(url) => Some(url.to_string()),
            // the service only mirrors PDFs; ask it before giving up
            None if file_type == FileType::Pdf => client
                .check_file(ResourceKind::Journals, &self.id, file_type)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        let target = DownloadTarget::new(&journal.id, file_type, &journal.title);
        download::fetch_to(
            &client,
            ResourceKind::Journals,
            &target,
            mirror.as_deref(),
            &self.out,
        )
        .await
    }
}

#[derive(Debug, Args)]
struct SubmitArgs {
    /// Manuscript file (PDF, DOC or DOCX).
    file: PathBuf,
    #[arg(long)]
    title: String,
    #[arg(long = "abstract", default_value = "")]
    abstract_text: String,
    /// Repeatable: one flag per author.
    #[arg(long = "author")]
    authors: Vec<String>,
    /// Repeatable: one flag per keyword.
    #[arg(long = "keyword")]
    keywords: Vec<String>,
    #[arg(long)]
    volume: Option<String>,
    #[arg(long)]
    issue: Option<String>,
}

impl SubmitArgs {
    async fn run(self) -> Result<()> {
        let client = client_for(&UPLOADS)?;
        let draft = ManuscriptDraft {
            title: self.title,
            abstract_text: self.abstract_text,
            authors: self.authors,
            keywords: self.keywords,
            volume: self.volume,
            issue: self.issue,
        };

        let journal = client
            .upload_journal(&draft, &self.file)
            .await
            .map_err(explain)?;
        notify::success(format!("published \"{}\" as {}", journal.title, journal.id));
        Ok(())
    }
}

#[derive(Debug, Args)]
struct DeleteArgs {
    id: String,
}

impl DeleteArgs {
    async fn run(self) -> Result<()> {
        let client = client_for(&MANAGE)?;
        client.delete_journal(&self.id).await.map_err(explain)?;
        notify::success(format!("deleted journal {}", self.id));
        Ok(())
    }
}
