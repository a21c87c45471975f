use std::process::ExitCode;
use wordle_tui::cli::{SourceConfig, parse_cli};
use wordle_tui::logging::{init_logging, log_file_path};
use wordle_tui::tui::{self, TuiInterface};
use wordle_tui::{
    BoardDisplay, GameController, GameError, GameSettings, OfflineDictionary, Validator,
    WordSource, WordsApiClient, load_wordbank_from_file,
};

trait Dictionary: WordSource + Validator {}
impl<T: WordSource + Validator> Dictionary for T {}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = parse_cli();

    if let Some(path) = log_file_path()
        && let Err(e) = init_logging(&path, &cli.log_level)
    {
        eprintln!("Could not open log file '{}': {e}", path.display());
    }

    let dictionary: Box<dyn Dictionary> = match cli.source() {
        SourceConfig::Api { base_url, random } => Box::new(WordsApiClient::new(&base_url, random)),
        SourceConfig::Offline { wordbank } => {
            match load_wordbank_from_file(&wordbank).and_then(OfflineDictionary::new) {
                Ok(dictionary) => Box::new(dictionary),
                Err(e) => {
                    eprintln!("Failed to load word bank from '{}': {e}", wordbank.display());
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    let result = play(dictionary.as_ref(), cli.settings()).await;
    if let Err(e) = result {
        eprintln!("Game aborted: {e}");
        log::error!("Game aborted: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn play(dictionary: &dyn Dictionary, settings: GameSettings) -> Result<(), GameError> {
    let mut tui = TuiInterface::new()?;
    let board = BoardDisplay::new(settings.rows);
    tui.draw(&board)?;

    let mut game = GameController::start(dictionary, board, settings).await?;
    tui::run(&mut tui, &mut game, dictionary).await
}
