use chrono::{Duration, Utc};
use wordmaster::{Quality, ReviewState, Word, preview, review};

fn schedule_new_word() -> Result<(), Box<dyn std::error::Error>> {
    // Create a new word
    let now = Utc::now();
    let word = Word::new("ubiquitous", "found everywhere", "Phones are ubiquitous.", now);

    // Show what each answer would do
    let next_states = preview(word.review_state(), now);
    println!("Forgot interval: {} days", next_states.forgot.interval);
    println!("Blurry interval: {} days", next_states.blurry.interval);
    println!("Know interval: {} days", next_states.know.interval);

    // Assume the learner knew the word
    let word = review(&word, Quality::KNOW, now);

    println!("Next review due: {}", word.next_review_date());
    println!(
        "Ease factor: {:.2}, proficiency: {}",
        word.easiness_factor(),
        word.proficiency()
    );
    Ok(())
}

fn schedule_existing_word() -> Result<(), Box<dyn std::error::Error>> {
    // A word reviewed three times, last a week ago
    let now = Utc::now();
    let word = Word::new("meticulous", "very careful", "", now).with_review_state(ReviewState {
        easiness_factor: 2.36,
        interval: 7,
        repetitions: 3,
        next_review_date: now,
        last_review_date: Some(now - Duration::days(7)),
    });

    // The learner answers with a raw quality score
    let quality = Quality::new(3)?;
    let word = review(&word, quality, now);

    println!("Next review due: {}", word.next_review_date());
    println!(
        "Interval: {} days, ease factor: {:.2}, proficiency: {}",
        word.interval(),
        word.easiness_factor(),
        word.proficiency()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Scheduling a new word:");
    schedule_new_word()?;

    println!("\nScheduling an existing word:");
    schedule_existing_word()?;

    Ok(())
}
