use std::error::Error;

use clap::ValueEnum;

// Termux sees the shared Android storage under this path
pub const DOWNLOADS_DIR: &str = "/storage/emulated/0/Download";

pub const UPDATE_COMMAND: &str = r#"pip install -U "yt-dlp[default]""#;

const FORMAT_480: &str = "bestvideo[height<=480]+bestaudio/best[height<=480]";
const FORMAT_360: &str = "bestvideo[height<=360]+bestaudio/best[height<=360]";

// What the user asked yt-dlp to do; also identifies the action that was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, derive_more::Display)]
pub enum DownloadMode {
    /// Best available video and audio
    #[default]
    #[value(name = "best")]
    #[display("best")]
    Best,
    /// Video capped at 480p
    #[value(name = "480")]
    #[display("480")]
    Quality480,
    /// Video capped at 360p
    #[value(name = "360")]
    #[display("360")]
    Quality360,
    /// Audio only, converted to mp3
    #[value(name = "mp3")]
    #[display("mp3")]
    AudioMp3,
    /// Upgrade yt-dlp itself; takes no URL
    #[value(name = "update")]
    #[display("update")]
    UpdateTool,
}

impl DownloadMode {
    pub fn needs_url(self) -> bool {
        self != DownloadMode::UpdateTool
    }
}

// Error type for composing and copying a command
#[derive(Debug, derive_more::Display)]
pub enum ComposeError {
    #[display("Please enter a URL")]
    EmptyUrl,
    #[display("Please enter a valid URL")]
    InvalidUrl,
    #[display("Failed to copy command")]
    ClipboardWrite,
}

impl Error for ComposeError {}

// Build the shell command for a mode.  The URL must already have passed
// validation; it is pasted into the final argument as-is.
//
// NOTE: a URL containing `"`, `$` or backticks is not escaped and will break
// out of the quoted argument.  Validation only checks the URL parses, and the
// parser is lenient enough to accept all three.
pub fn compose(url: &str, mode: DownloadMode) -> String {
    let ytdlp = match mode {
        DownloadMode::Best => format!(r#"yt-dlp --no-part "{url}""#),
        DownloadMode::Quality480 => format!(r#"yt-dlp --no-part -f "{FORMAT_480}" "{url}""#),
        DownloadMode::Quality360 => format!(r#"yt-dlp --no-part -f "{FORMAT_360}" "{url}""#),
        DownloadMode::AudioMp3 => format!(r#"yt-dlp --no-part -x --audio-format mp3 "{url}""#),
        DownloadMode::UpdateTool => return UPDATE_COMMAND.to_string(),
    };

    format!("{} && {ytdlp}", prefix())
}

fn prefix() -> String {
    let dir = format!("{DOWNLOADS_DIR}/yt-dlp");
    format!("mkdir -p {dir} && cd {dir}")
}
