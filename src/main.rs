use clap::{ArgAction, Parser, crate_authors, crate_name, crate_version};

use ytcmd::{
    clipboard::SystemClipboard, compose::DownloadMode, composer::Composer, logging, session,
};

#[derive(Parser)]
#[command(
    name = crate_name!(),
    author = crate_authors!(", "),
    version = crate_version!(),
)]
/// Build yt-dlp commands and copy them to the clipboard
struct Cli {
    /// Video URL; read from the clipboard if omitted
    #[arg(
        action = ArgAction::Set,
        num_args = 1,
        value_name = "URL",
    )]
    url: Option<String>,

    /// What the command should do
    #[arg(short, long, value_enum, default_value_t = DownloadMode::Best)]
    mode: DownloadMode,

    /// Print the command without copying it
    #[arg(short, long)]
    print: bool,

    /// Start an interactive session
    #[arg(short, long, conflicts_with_all = ["url", "mode", "print"])]
    interactive: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging();

    let mut composer = match cli.url {
        Some(url) => {
            let mut composer = Composer::new(SystemClipboard);
            composer.set_url(url);
            composer
        }
        None => Composer::start(SystemClipboard),
    };

    if cli.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        if let Err(e) = session::run(&mut composer, stdin, tokio::io::stdout()).await {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let result = if cli.print {
        composer.compose(cli.mode)
    } else {
        composer.run(cli.mode)
    };

    match result {
        Ok(command) => {
            if let Some(status) = composer.feedback().status() {
                eprintln!("{}", status);
            }
            println!("{}", command);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
