use chrono::Utc;
use log::LevelFilter;
use wordmaster::{
    JsonStore, ProficiencyCounts, Quality, ReviewSession, Store, SystemClock, Word,
};

fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger()?;

    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wordmaster-data".to_string());
    let mut store = JsonStore::new(dir);

    // Seed a few words; terms already present are skipped
    let now = Utc::now();
    let added = store.add_words(vec![
        Word::new("candid", "truthful and straightforward", "", now).with_tag("imported"),
        Word::new("diligent", "showing care in one's work", "", now).with_tag("imported"),
        Word::new("eloquent", "fluent and persuasive", "", now).with_tag("imported"),
    ])?;
    println!("added {} words, {} duplicates", added.added, added.duplicates);

    // Answer every word in the queue in turn
    let answers = [Quality::KNOW, Quality::BLURRY, Quality::FORGOT];
    let mut session = ReviewSession::start(&mut store, SystemClock)?;
    let mut answer = answers.iter().cycle();
    while let Some(word) = session.current() {
        println!("Reviewing {}", word.term);
        if let Some(&quality) = answer.next() {
            session.review(quality, 4.0)?;
        }
    }
    let summary = session.summary();
    println!(
        "reviewed {} (know {}, blurry {}, forgot {})",
        summary.reviewed, summary.known, summary.blurry, summary.forgot
    );

    let stats = store.load_stats()?;
    let settings = store.load_settings()?;
    let counts = ProficiencyCounts::from_words(&store.load_words()?);
    println!(
        "streak {} days, {}% of daily goal, {} learning, {} mastered",
        stats.streak_days,
        stats.daily_progress_percent(settings.daily_goal),
        counts.learning,
        counts.mastered
    );
    Ok(())
}
