//! Manuscript-submission commands, from upload through the review pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use quire_api::journals::{ListQuery, ManuscriptDraft};
use quire_core::model::{FileType, ResourceKind, Submission, SubmissionStatus};
use quire_core::ui::notify;
use quire_core::ui::table::Formatter;
use quire_fetch::DownloadTarget;
use tabled::Tabled;

use super::{ADMIN, CONTRIBUTORS, SIGNED_IN, Surface, client_for, download, explain};

const DASHBOARD: Surface = Surface {
    route: "/dashboard",
    guard: SIGNED_IN,
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
pub struct SubmissionArgs {
    #[command(subcommand)]
    cmd: SubmissionCommands,
}

#[derive(Debug, Subcommand)]
enum SubmissionCommands {
    /// Browse manuscript submissions.
    #[command(alias = "ls")]
    List(ListArgs),
    /// Show one submission.
    Show(ShowArgs),
    /// Download a submission's manuscript file.
    #[command(alias = "dl")]
    Download(DownloadArgs),
    /// Submit a manuscript for review.
    Submit(SubmitArgs),
    /// Move a submission through the review pipeline.
    Status(StatusArgs),
    /// Withdraw a submission.
    #[command(alias = "rm")]
    Delete(DeleteArgs),
}

impl SubmissionArgs {
    pub async fn run(self) -> Result<()> {
        match self.cmd {
            SubmissionCommands::List(args) => args.run().await,
            SubmissionCommands::Show(args) => args.run().await,
            SubmissionCommands::Download(args) => args.run().await,
            SubmissionCommands::Submit(args) => args.run().await,
            SubmissionCommands::Status(args) => args.run().await,
            SubmissionCommands::Delete(args) => args.run().await,
        }
    }
}

#[derive(Tabled)]
struct SubmissionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "SUBMITTED")]
    submitted: String,
}

impl From<&Submission> for SubmissionRow {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id.clone(),
            title: submission.title.clone(),
            status: submission.status.to_string(),
            submitted: submission
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
        let client = client_for(&DASHBOARD)?;
        let submissions = client
            .submissions(&ListQuery {
                page: self.page,
                limit: self.limit,
                search: self.search,
            })
            .await
            .map_err(explain)?;

        if submissions.is_empty() {
            notify::info("no submissions found");
            return Ok(());
        }

        let table = Formatter::default()
            .with_footer(&format!("{} submission(s)", submissions.len()))
            .build(submissions.iter().map(SubmissionRow::from));
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
        let client = client_for(&DASHBOARD)?;
        let submission = client.submission(&self.id).await.map_err(explain)?;

        println!("{} [{}]", submission.title, submission.status);
        if !submission.authors.is_empty() {
            println!("authors: {}", submission.authors.join(", "));
        }
        if !submission.abstract_text.is_empty() {
            println!("\n{}", submission.abstract_text);
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
        let client = client_for(&DASHBOARD)?;
        let file_type: FileType = self.format.parse()?;

        let submission = client.submission(&self.id).await.map_err(explain)?;
        let mirror = match submission.mirror_url(file_type) {
            Some(url) => Some(url.to_string()),
            None if file_type == FileType::Pdf => client
                .check_file(ResourceKind::Submissions, &self.id, file_type)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        let target = DownloadTarget::new(&submission.id, file_type, &submission.title);
        download::fetch_to(
            &client,
            ResourceKind::Submissions,
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
}

impl SubmitArgs {
    async fn run(self) -> Result<()> {
        let client = client_for(&UPLOADS)?;
        let draft = ManuscriptDraft {
            title: self.title,
            abstract_text: self.abstract_text,
            authors: self.authors,
            keywords: self.keywords,
            volume: None,
            issue: None,
        };

        let submission = client
            .upload_submission(&draft, &self.file)
            .await
            .map_err(explain)?;
        notify::success(format!(
            "submitted \"{}\" as {} ({})",
            submission.title, submission.id, submission.status
        ));
        Ok(())
    }
}

#[derive(Debug, Args)]
struct StatusArgs {
    id: String,
    /// submitted, under_review, accepted, rejected or published.
    status: String,
}

impl StatusArgs {
    async fn run(self) -> Result<()> {
        let client = client_for(&MANAGE)?;
        let status: SubmissionStatus = self.status.parse()?;

        let submission = client
            .update_submission_status(&self.id, status)
            .await
            .map_err(explain)?;
        notify::success(format!(
            "submission {} is now {}",
            submission.id, submission.status
        ));
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
        client.delete_submission(&self.id).await.map_err(explain)?;
        notify::success(format!("deleted submission {}", self.id));
        Ok(())
    }
}
