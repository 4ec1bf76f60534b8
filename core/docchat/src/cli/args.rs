use crate::adapter::CliOverrides;
use crate::domain::{ChatEndpoint, DocChatCommand, Theme};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -s / --server: チャットサーバのベース URL
    pub server: Option<String>,
    /// -e / --endpoint: chat または chat-api
    pub endpoint: Option<ChatEndpoint>,
    /// -u / --upload: PDF をアップロードして終了する
    pub upload: Option<PathBuf>,
    /// --clear: サーバ側の会話履歴を消して終了する
    pub clear: bool,
    /// -y / --yes: 確認プロンプトに自動で承認する
    pub yes: bool,
    /// --no-interactive: 確認プロンプトを出さない（確認は常に拒否）
    pub non_interactive: bool,
    /// --transcript: HTML トランスクリプトの出力先
    pub transcript: Option<PathBuf>,
    pub theme: Option<Theme>,
    /// -v / --verbose: 人間向けログを stderr に出す
    pub verbose: bool,
    pub message_args: Vec<String>,
}

impl Config {
    /// 設定ファイル・環境変数より優先される項目
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            server_url: self.server.clone(),
            endpoint: self.endpoint,
            transcript_html: self.transcript.clone(),
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("docchat")
        .about("Chat with a document assistant server from the terminal")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("server")
                .short('s')
                .long("server")
                .value_name("url")
                .help("Chat server base URL (default: http://127.0.0.1:5000)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("endpoint")
                .short('e')
                .long("endpoint")
                .value_name("endpoint")
                .help("Chat endpoint: chat or chat-api")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("upload")
                .short('u')
                .long("upload")
                .value_name("pdf")
                .help("Upload a PDF document and exit")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("clear")
                .long("clear")
                .help("Clear the chat history on the server and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Answer yes to confirmation prompts")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("no-interactive")
                .long("no-interactive")
                .help("Do not prompt for confirmations (they are declined)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("transcript")
                .long("transcript")
                .value_name("html")
                .help("Also write the conversation to an HTML file")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("theme")
                .long("theme")
                .value_name("theme")
                .help("Color theme: dark or light (saved for next time)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit verbose logs to stderr (for troubleshooting)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("positional")
                .index(1)
                .help("Message words (one-shot mode)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Result<Config, Error> {
    let endpoint = matches
        .get_one::<String>("endpoint")
        .map(|s| s.parse::<ChatEndpoint>())
        .transpose()
        .map_err(Error::invalid_argument)?;
    let theme = matches
        .get_one::<String>("theme")
        .map(|s| s.parse::<Theme>())
        .transpose()
        .map_err(Error::invalid_argument)?;
    let message_args: Vec<String> = matches
        .get_many::<String>("positional")
        .map(|i| i.cloned().collect())
        .unwrap_or_default();

    Ok(Config {
        help: matches.get_flag("help"),
        server: matches.get_one::<String>("server").cloned(),
        endpoint,
        upload: matches.get_one::<PathBuf>("upload").cloned(),
        clear: matches.get_flag("clear"),
        yes: matches.get_flag("yes"),
        non_interactive: matches.get_flag("no-interactive"),
        transcript: matches.get_one::<PathBuf>("transcript").cloned(),
        theme,
        verbose: matches.get_flag("verbose"),
        message_args,
    })
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)?))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    matches_to_config(&matches)
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "docchat", &mut std::io::stdout());
}

/// Config を DocChatCommand に変換する
///
/// help > upload > clear > メッセージ（one-shot）> 対話 の順。
pub fn config_to_command(config: &Config) -> Result<DocChatCommand, Error> {
    if config.help {
        return Ok(DocChatCommand::Help);
    }
    let has_message = !config.message_args.is_empty();

    if let Some(path) = &config.upload {
        if config.clear || has_message {
            return Err(Error::invalid_argument(
                "--upload cannot be combined with --clear or a message",
            ));
        }
        return Ok(DocChatCommand::Upload { path: path.clone() });
    }

    if config.clear {
        if has_message {
            return Err(Error::invalid_argument("--clear cannot be combined with a message"));
        }
        return Ok(DocChatCommand::Clear);
    }

    if has_message {
        let message = config.message_args.join(" ");
        if message.trim().is_empty() {
            return Err(Error::invalid_argument("message must not be empty"));
        }
        return Ok(DocChatCommand::Ask { message });
    }

    Ok(DocChatCommand::Interactive)
}

pub fn print_usage() {
    eprintln!("Usage: docchat [options] [message...]");
}

pub fn print_help() {
    println!("Usage: docchat [options] [message...]");
    println!("Options:");
    println!("  -h, --help                Show this help message");
    println!("  -s, --server <url>        Chat server base URL (default: http://127.0.0.1:5000)");
    println!("  -e, --endpoint <name>     Chat endpoint: chat (default) or chat-api");
    println!("  -u, --upload <pdf>        Upload a PDF document and exit");
    println!("  --clear                   Clear the chat history on the server and exit");
    println!("  -y, --yes                 Answer yes to confirmation prompts");
    println!("  --no-interactive          Do not prompt for confirmations (they are declined)");
    println!("  --transcript <html>       Also write the conversation to an HTML file");
    println!("  --theme <dark|light>      Color theme (saved for next time)");
    println!("  -v, --verbose             Emit verbose logs to stderr");
    println!("  --generate <shell>        Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  DOCCHAT_SERVER     Chat server base URL (overridden by --server)");
    println!("  DOCCHAT_HOME       Config directory (config.json). Default: $XDG_CONFIG_HOME/docchat");
    println!("  DOCCHAT_STATE_DIR  State directory (theme, logs). Default: $XDG_STATE_HOME/docchat");
    println!();
    println!("Description:");
    println!("  Without a message, an interactive session starts. Type /help there for commands.");
    println!("  With a message, it is sent once and the reply is printed.");
    println!();
    println!("Examples:");
    println!("  docchat");
    println!("  docchat What is the case study about?");
    println!("  docchat -u report.pdf");
    println!("  docchat --clear -y");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_no_args() {
        let config = parse_args_from(&["docchat"]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config_to_command(&config).unwrap(), DocChatCommand::Interactive);
    }

    #[test]
    fn test_parse_args_message() {
        let config = parse_args_from(&["docchat", "-s", "http://h:1", "What", "is", "it?"]).unwrap();
        assert_eq!(config.server.as_deref(), Some("http://h:1"));
        assert_eq!(
            config_to_command(&config).unwrap(),
            DocChatCommand::Ask {
                message: "What is it?".into()
            }
        );
    }

    #[test]
    fn test_parse_args_endpoint_and_theme() {
        let config = parse_args_from(&["docchat", "-e", "chat-api", "--theme", "dark"]).unwrap();
        assert_eq!(config.endpoint, Some(ChatEndpoint::ChatApi));
        assert_eq!(config.theme, Some(Theme::Dark));

        let err = parse_args_from(&["docchat", "-e", "upload"]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_parse_args_unknown_option() {
        let err = parse_args_from(&["docchat", "--unknown"]).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_upload_and_clear_commands() {
        let config = parse_args_from(&["docchat", "-u", "case.pdf"]).unwrap();
        assert_eq!(
            config_to_command(&config).unwrap(),
            DocChatCommand::Upload {
                path: PathBuf::from("case.pdf")
            }
        );

        let config = parse_args_from(&["docchat", "--clear", "-y"]).unwrap();
        assert!(config.yes);
        assert_eq!(config_to_command(&config).unwrap(), DocChatCommand::Clear);

        let config = parse_args_from(&["docchat", "--clear", "hello"]).unwrap();
        assert!(config_to_command(&config).is_err());
    }

    #[test]
    fn test_help_wins() {
        let config = parse_args_from(&["docchat", "-h", "--clear"]).unwrap();
        assert_eq!(config_to_command(&config).unwrap(), DocChatCommand::Help);
    }
}
