// bases/addfilm/src/app.rs
use crate::args::Args;
use crate::output::OutputHandler;
use clip_extractor::{ClipRequest, Ingestion, SiteLayout, SystemRunner, Toolchain};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::path::Path;
use std::sync::Arc;

pub struct App {
    args: Args,
    output: OutputHandler,
}

impl App {
    pub fn new(args: Args) -> Self {
        let output = OutputHandler::new(args.verbose);
        Self { args, output }
    }

    pub async fn run(&self) -> Result<()> {
        let request = self.prepare()?;
        let toolchain = Toolchain::detect()?;

        self.output.print_start(&request, &toolchain);

        let ingestion = Ingestion::new(
            Arc::new(SystemRunner),
            toolchain,
            &self.args.work_dir,
            SiteLayout::new(&self.args.site_dir),
        )
        .with_cleanup(self.args.cleanup);

        let published = ingestion
            .run(&request)
            .await
            .wrap_err_with(|| format!("failed to add {}", request.name))?;

        self.output.print_complete(&published);
        Ok(())
    }

    /// Checks that need no external tools: directories and the clip itself
    fn prepare(&self) -> Result<ClipRequest> {
        require_dir("FINAL_SCENES_ADD_FILM_DIR", &self.args.work_dir)?;
        require_dir("FINAL_SCENES_DIR", &self.args.site_dir)?;
        tracing::debug!(
            "work dir {}, site dir {}",
            self.args.work_dir.display(),
            self.args.site_dir.display()
        );

        let request = ClipRequest::new(
            self.args.url.clone(),
            self.args.name.clone(),
            self.args.start.clone(),
            self.args.end.clone(),
            self.args.year.clone(),
            self.args.image.clone(),
        )?;
        Ok(request)
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}

fn require_dir(variable: &str, path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(eyre!(
            "{} ({}) is not an existing directory",
            variable,
            path.display()
        ))
    }
}
