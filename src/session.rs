use std::io;

use clap::ValueEnum;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    clipboard::Clipboard,
    compose::DownloadMode,
    composer::Composer,
    install::InstallOutcome,
    status::Status,
};

const HELP: &str = "\
Type or paste a URL, then pick an action:
  <Enter>   copy the download command (best quality)
  best      copy the download command (best quality)
  480       copy the download command, video capped at 480p
  360       copy the download command, video capped at 360p
  mp3       copy the audio-only (mp3) command
  update    copy the yt-dlp update command
  clear     clear the URL
  show      show the URL and current status
  install   install the app, when offered
  help      show this help
  quit      leave
";

// One line of user input
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Action(DownloadMode),
    Clear,
    Show,
    Install,
    Help,
    Quit,
    Url(String),
}

fn parse(line: &str) -> Input {
    let line = line.trim();

    // Pressing Enter in the URL field triggers the default download
    if line.is_empty() {
        return Input::Action(DownloadMode::default());
    }

    if let Ok(mode) = DownloadMode::from_str(line, true) {
        return Input::Action(mode);
    }

    match line.to_lowercase().as_str() {
        "clear" => Input::Clear,
        "show" => Input::Show,
        "install" => Input::Install,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => Input::Url(line.to_string()),
    }
}

fn describe(status: &Status) -> String {
    format!("[{}] {}", status.kind, status.message)
}

// Run the interactive session until `quit` or end of input.
//
// Anything that is not a command replaces the URL, the way typing into the
// URL field would.  Invalid URLs are only reported when an action is run.
pub async fn run<C, R, W>(composer: &mut Composer<C>, input: R, mut out: W) -> io::Result<()>
where
    C: Clipboard,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if composer.url().is_empty() {
        out.write_all(b"Paste a video URL (\"help\" for commands)\n")
            .await?;
    } else {
        let line = format!("URL from clipboard: {}\n", composer.url());
        out.write_all(line.as_bytes()).await?;
    }

    let mut lines = input.lines();
    loop {
        out.write_all(b"> ").await?;
        out.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = match parse(&line) {
            Input::Action(mode) => {
                let result = composer.run(mode);
                let status = composer
                    .feedback()
                    .status()
                    .map(|s| describe(&s))
                    .unwrap_or_default();
                match result {
                    Ok(command) => format!("{status}\n{command}\n"),
                    Err(_) => format!("{status}\n"),
                }
            }
            Input::Clear => {
                composer.clear_url();
                "URL cleared\n".to_string()
            }
            Input::Show => show(composer),
            Input::Install => match composer.install().await {
                Some(InstallOutcome::Accepted) => "Installed\n".to_string(),
                Some(InstallOutcome::Dismissed) => "Install dismissed\n".to_string(),
                None => "Install is not available\n".to_string(),
            },
            Input::Help => HELP.to_string(),
            Input::Quit => break,
            Input::Url(url) => {
                composer.set_url(url);
                String::new()
            }
        };

        out.write_all(reply.as_bytes()).await?;
    }

    out.flush().await
}

fn show<C: Clipboard>(composer: &Composer<C>) -> String {
    let url = match composer.url() {
        "" => "(empty)",
        url => url,
    };
    let status = composer
        .feedback()
        .status()
        .map(|s| describe(&s))
        .unwrap_or_else(|| "(none)".to_string());
    let copied = composer
        .feedback()
        .copied()
        .map(|mode| format!("{mode}"))
        .unwrap_or_else(|| "(none)".to_string());
    let install = if composer.install_visible() {
        "offered"
    } else {
        "not offered"
    };

    format!("url:     {url}\nstatus:  {status}\ncopied:  {copied}\ninstall: {install}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clipboard::fake::FakeClipboard, install::fake::FakePrompt};

    async fn session(composer: &mut Composer<FakeClipboard>, input: &str) -> String {
        let mut out = Vec::new();
        run(composer, input.as_bytes(), &mut out)
            .await
            .expect("session ran");
        String::from_utf8(out).expect("utf-8 output")
    }

    mod parse {
        use super::*;

        #[test]
        fn test_actions() {
            assert_eq!(parse("best"), Input::Action(DownloadMode::Best));
            assert_eq!(parse(" 480 "), Input::Action(DownloadMode::Quality480));
            assert_eq!(parse("360"), Input::Action(DownloadMode::Quality360));
            assert_eq!(parse("MP3"), Input::Action(DownloadMode::AudioMp3));
            assert_eq!(parse("update"), Input::Action(DownloadMode::UpdateTool));
        }

        #[test]
        fn test_enter_runs_default() {
            assert_eq!(parse(""), Input::Action(DownloadMode::Best));
            assert_eq!(parse("   "), Input::Action(DownloadMode::Best));
        }

        #[test]
        fn test_commands() {
            assert_eq!(parse("clear"), Input::Clear);
            assert_eq!(parse("show"), Input::Show);
            assert_eq!(parse("install"), Input::Install);
            assert_eq!(parse("?"), Input::Help);
            assert_eq!(parse("Quit"), Input::Quit);
        }

        #[test]
        fn test_anything_else_is_a_url() {
            assert_eq!(
                parse("https://youtu.be/abc"),
                Input::Url("https://youtu.be/abc".to_string())
            );
            assert_eq!(parse("not a url"), Input::Url("not a url".to_string()));
        }
    }

    mod run {
        use super::*;

        #[tokio::test]
        async fn test_paste_then_enter() {
            let mut composer = Composer::new(FakeClipboard::default());
            let output = session(&mut composer, "https://youtu.be/abc\n\n").await;

            assert!(output.contains("[success] Command copied! Paste in Termux"));
            assert!(output.contains("yt-dlp --no-part \"https://youtu.be/abc\""));
            assert_eq!(composer.url(), "https://youtu.be/abc");
        }

        #[tokio::test]
        async fn test_prefilled_url_is_announced() {
            let mut composer = Composer::start(FakeClipboard::holding("https://youtu.be/abc"));
            let output = session(&mut composer, "quit\n").await;
            assert!(output.starts_with("URL from clipboard: https://youtu.be/abc\n"));
        }

        #[tokio::test]
        async fn test_invalid_url_reports_error() {
            let mut composer = Composer::new(FakeClipboard::default());
            let output = session(&mut composer, "not a url\nmp3\n").await;

            assert!(output.contains("[error] Please enter a valid URL"));
            assert!(!output.contains("yt-dlp --no-part"));
            assert_eq!(composer.url(), "not a url");
        }

        #[tokio::test]
        async fn test_clear_then_run() {
            let mut composer = Composer::new(FakeClipboard::default());
            let output = session(&mut composer, "https://youtu.be/abc\nclear\nbest\n").await;

            assert!(output.contains("URL cleared"));
            assert!(output.contains("[error] Please enter a URL"));
        }

        #[tokio::test]
        async fn test_update_without_url() {
            let mut composer = Composer::new(FakeClipboard::default());
            let output = session(&mut composer, "update\n").await;

            assert!(output.contains("[info] Update command copied! Paste in Termux"));
            assert!(output.contains("pip install -U \"yt-dlp[default]\""));
        }

        #[tokio::test]
        async fn test_show() {
            let mut composer = Composer::new(FakeClipboard::default());
            let output = session(&mut composer, "https://youtu.be/abc\n480\nshow\n").await;

            assert!(output.contains("url:     https://youtu.be/abc"));
            assert!(output.contains("status:  [success] Command copied! Paste in Termux"));
            assert!(output.contains("copied:  480"));
            assert!(output.contains("install: not offered"));
        }

        #[tokio::test]
        async fn test_install() {
            let mut composer = Composer::new(FakeClipboard::default());
            let output = session(&mut composer, "install\n").await;
            assert!(output.contains("Install is not available"));

            let (handle, _) = FakePrompt::boxed(InstallOutcome::Dismissed);
            composer.offer_install(handle);
            let output = session(&mut composer, "install\ninstall\n").await;
            assert!(output.contains("Install dismissed"));
            assert!(output.contains("Install is not available"));
        }

        #[tokio::test]
        async fn test_quit_stops_reading() {
            let mut composer = Composer::new(FakeClipboard::default());
            let output = session(&mut composer, "quit\nupdate\n").await;
            assert!(!output.contains("pip install"));
            assert_eq!(composer.feedback().copied(), None);
        }
    }
}
