use std::io::{self, Write};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use medquiz::acquisition::Acquirer;
use medquiz::config::Config;
use medquiz::constants::papers::papers_for;
use medquiz::engine::ScoreReport;
use medquiz::models::{Category, Difficulty, ProfYear, RegistrationInput};
use medquiz::session::{Session, SessionState};
use medquiz::storage::JsonFileStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let store = Arc::new(JsonFileStore::new(&config.store_path));
    let acquirer = Acquirer::from_config(&config);
    let mut session = Session::new(&config, acquirer, store);

    println!("MedQuiz - MBBS/BDS exam practice");

    loop {
        match session.state() {
            SessionState::Registration => run_registration(&mut session),
            SessionState::ModeSelect => {
                if !run_mode_select(&mut session).await {
                    break;
                }
            }
            SessionState::ArchiveBrowsing { .. } => run_archive(&mut session).await,
            SessionState::Active(_) => run_question(&mut session),
            SessionState::Review(quiz) => {
                let report = quiz.report();
                let elapsed = chrono::Utc::now().signed_duration_since(quiz.started_at());
                if !run_review(&mut session, report, elapsed.num_seconds().max(0)) {
                    break;
                }
            }
            SessionState::Error { message } => {
                println!("\n{}", message);
                prompt("Press enter to return to mode selection");
                session
                    .dismiss_error()
                    .expect("error state should be dismissible");
            }
            SessionState::Loading => {
                // Transient inside the async loaders; never observed here.
            }
        }
    }
}

fn run_registration(session: &mut Session) {
    println!("\n-- Registration --");
    let name = prompt("Name");
    let roll_number = prompt("Roll number");
    let category = match prompt("Category (1: MBBS, 2: BDS)").as_str() {
        "2" => Category::BDS,
        _ => Category::MBBS,
    };
    let year = pick_year(category.relevant_years());

    let input = RegistrationInput {
        name,
        roll_number,
        category,
        year,
    };
    if let Err(err) = session.register(input) {
        println!("{}", err);
    }
}

async fn run_mode_select(session: &mut Session) -> bool {
    println!("\n-- Mode --");
    println!("  1) AI-generated quiz");
    println!("  2) Extract from a document");
    println!("  3) Community archive");
    println!("  x) Exit");

    match prompt("Choice").as_str() {
        "1" => {
            let difficulty = match prompt("Difficulty (1: Standard, 2: Clinical, 3: Elite)").as_str()
            {
                "2" => Difficulty::Clinical,
                "3" => Difficulty::Elite,
                _ => Difficulty::Standard,
            };
            let topic = prompt("Topic");
            // On failure the session has already moved to the Error state.
            let _ = session.start_generated(difficulty, &topic).await;
        }
        "2" => {
            let path = prompt("Document path");
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let data = BASE64.encode(bytes);
                    let _ = session.start_from_file(data, mime_type_for(&path)).await;
                }
                Err(err) => println!("Could not read {}: {}", path, err),
            }
        }
        "3" => {
            let _ = session.open_archive().await;
        }
        "x" => return false,
        other => println!("Unknown choice: {}", other),
    }
    true
}

async fn run_archive(session: &mut Session) {
    let SessionState::ArchiveBrowsing {
        year,
        available,
        sync_error,
    } = session.state()
    else {
        return;
    };
    let year = *year;

    println!("\n-- Archive ({}) | repo {} --", year, session.repo_path());
    if let Some(message) = sync_error {
        println!("  ! {}", message);
    }
    for (i, paper) in papers_for(year).iter().enumerate() {
        let marker = if available.is_available(year, paper) {
            "available"
        } else {
            "--"
        };
        println!("  {}) {} [{}]", i + 1, paper, marker);
    }
    println!("  y) Switch year  r) Change repo + sync  b) Back");

    let choice = prompt("Choice");
    match choice.as_str() {
        "y" => {
            let category = session
                .profile()
                .map(|p| p.category)
                .unwrap_or(Category::MBBS);
            let year = pick_year(category.relevant_years());
            if let Err(err) = session.select_year(year).await {
                println!("{}", err);
            }
        }
        "r" => {
            let repo = prompt("Repository (user/name)");
            session.set_repo_path(&repo);
            if let Err(err) = session.sync().await {
                println!("{}", err);
            }
        }
        "b" => {
            if let Err(err) = session.close_archive() {
                println!("{}", err);
            }
        }
        other => {
            let papers = papers_for(year);
            match other.parse::<usize>() {
                Ok(n) if n >= 1 && n <= papers.len() => {
                    if let Err(err) = session.start_paper(papers[n - 1]).await {
                        println!("{}", err);
                    }
                }
                _ => println!("Unknown choice: {}", other),
            }
        }
    }
}

fn run_question(session: &mut Session) {
    let SessionState::Active(quiz) = session.state() else {
        return;
    };
    let Some(question) = quiz.current_question() else {
        return;
    };

    println!(
        "\nQuestion {}/{}",
        quiz.current_index() + 1,
        quiz.questions().len()
    );
    println!("{}", question.question);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}) {}", option_letter(i), option);
    }

    let choice = prompt("Answer (A-E, s to skip)").to_lowercase();
    let selection = match choice.as_str() {
        "s" => None,
        letter => match letter.chars().next().and_then(letter_index) {
            Some(index) => Some(index),
            None => {
                println!("Unknown choice: {}", choice);
                return;
            }
        },
    };

    if let Err(err) = session.answer(selection) {
        println!("{}", err);
    }
}

fn run_review(session: &mut Session, report: ScoreReport, elapsed_secs: i64) -> bool {
    println!("\n-- Result --");
    println!(
        "Score: {}/{} ({}%), skipped {}",
        report.score, report.total, report.percentage, report.skipped
    );
    println!("Time: {:02}:{:02}", elapsed_secs / 60, elapsed_secs % 60);

    for (i, row) in report.rows.iter().enumerate() {
        let verdict = if row.is_correct() {
            "correct"
        } else if row.chosen.is_none() {
            "skipped"
        } else {
            "wrong"
        };
        println!("\n{}. {} [{}]", i + 1, row.question, verdict);
        println!(
            "   Correct: {}) {}",
            option_letter(row.correct_index),
            row.options[row.correct_index]
        );
        println!("   {}", row.explanation);
    }

    match prompt("\nn) New quiz  h) Home  x) Exit").as_str() {
        "n" => {
            session.new_quiz().expect("review state allows a new quiz");
            true
        }
        "h" => {
            session.go_home();
            true
        }
        _ => false,
    }
}

fn pick_year(years: &[ProfYear]) -> ProfYear {
    for (i, year) in years.iter().enumerate() {
        println!("  {}) {}", i + 1, year);
    }
    let choice = prompt("Year");
    choice
        .parse::<usize>()
        .ok()
        .and_then(|n| years.get(n.wrapping_sub(1)))
        .copied()
        .unwrap_or(years[0])
}

fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

fn letter_index(letter: char) -> Option<usize> {
    match letter {
        'a'..='e' => Some(letter as usize - 'a' as usize),
        _ => None,
    }
}

fn mime_type_for(path: &str) -> String {
    let mime = match path.rsplit('.').next().map(str::to_lowercase).as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    };
    mime.to_string()
}

fn prompt(label: &str) -> String {
    print!("{}: ", label);
    io::stdout().flush().expect("failed to flush stdout");
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .expect("failed to read stdin");
    line.trim().to_string()
}
