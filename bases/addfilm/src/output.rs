// bases/addfilm/src/output.rs
use clip_extractor::{ClipRequest, PublishedFilm, Toolchain};

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_start(&self, request: &ClipRequest, toolchain: &Toolchain) {
        println!("Adding {} ({}) from: {}", request.name, request.year, request.url);
        println!("Clip: {} to {}, still at {}", request.start, request.end, request.still_at);

        if self.verbose {
            println!(
                "Tools: {} and {}",
                toolchain.downloader.program(),
                toolchain.ffmpeg
            );
        }
    }

    pub fn print_complete(&self, published: &PublishedFilm) {
        println!("Added: {}", published.film.name());
        println!("Audio: {}", published.audio_path.display());
        println!("Image: {}", published.image_path.display());

        if self.verbose {
            println!("Hash: {}", published.film.hash());
            println!("Catalog: {}", published.catalog_path.display());
        }
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("Error: {}", error);

        error.chain().skip(1).for_each(|cause| {
            eprintln!("  caused by: {}", cause);
        });
    }
}
