//! Essential properties shared by every text maker strategy.

use std::collections::HashSet;
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_press_core::PressError;
use rs_press_core::model::{Model, Sentence, Strategy, Token};
use rs_press_core::text::{TextMaker, TextMakerConfig};

const ZEN: &str = "\
Beautiful is better than ugly .
Explicit is better than implicit .
Simple is better than complex .
Complex is better than complicated .
Flat is better than nested .
Sparse is better than dense .
Readability counts .
Special cases are not special enough to break the rules .
Although practicality beats purity .
Errors should never pass silently .
Unless explicitly silenced .
";

fn each_text_maker(ngram_size: usize) -> Vec<TextMaker> {
	Strategy::ALL
		.iter()
		.map(|strategy| TextMaker::new(*strategy, ngram_size).unwrap())
		.collect()
}

fn vocabulary(sentences: &[Sentence]) -> HashSet<&str> {
	sentences.iter().flatten().map(String::as_str).collect()
}

fn sentence(text: &str) -> Sentence {
	text.split_whitespace().map(str::to_owned).collect()
}

#[test]
fn output_is_subset_of_input() {
	for ngram_size in 1..6 {
		for mut text_maker in each_text_maker(ngram_size) {
			let tokenized = text_maker.train(ZEN).unwrap();
			let mut rng = StdRng::seed_from_u64(ngram_size as u64);
			let generated = text_maker.generate(300, &mut rng).unwrap();

			let input = vocabulary(&tokenized);
			let output = vocabulary(&generated);
			assert!(!output.is_empty());
			assert!(
				output.is_subset(&input),
				"{}: {:?} not in input",
				text_maker.strategy(),
				output.difference(&input).collect::<Vec<_>>()
			);
		}
	}
}

#[test]
fn subset_check_would_catch_foreign_tokens() {
	let mut text_maker = TextMaker::new(Strategy::Backoff, 2).unwrap();
	let tokenized = text_maker.train(ZEN).unwrap();
	let mut generated = text_maker.generate(10, &mut StdRng::seed_from_u64(0)).unwrap();
	generated.push(sentence("XXXXXXXXXXXX_Not_In_Input"));

	assert!(!vocabulary(&generated).is_subset(&vocabulary(&tokenized)));
}

#[test]
fn unique_ngrams_are_deterministic() {
	for ngram_size in 1..12 {
		for mut text_maker in each_text_maker(ngram_size) {
			text_maker.train("a b c d").unwrap();
			for seed in 0..10 {
				let mut rng = StdRng::seed_from_u64(seed);
				let generated = text_maker.generate(1, &mut rng).unwrap();
				assert_eq!(generated, vec![sentence("a b c d")], "{}", text_maker.strategy());
			}
		}
	}
}

#[test]
fn every_distribution_is_normalized() {
	for mut text_maker in each_text_maker(3) {
		text_maker.train(ZEN).unwrap();
		let table = text_maker.model().unwrap().table();
		for (context, distribution) in table.contexts() {
			let total = distribution.total();
			assert!((total - 1.0).abs() < 1e-9, "{context:?} sums to {total}");
		}
	}
}

#[test]
fn training_twice_is_refused_and_keeps_first_model() {
	for mut text_maker in each_text_maker(2) {
		text_maker.train("Foo bar baz .\nFoo bar quux .").unwrap();

		let result = text_maker.train("This should not be loaded");
		assert!(matches!(result, Err(PressError::Locked { .. })));

		let generated = text_maker.generate(50, &mut StdRng::seed_from_u64(3)).unwrap();
		let output = vocabulary(&generated);
		assert!(!output.contains("This"));
		assert!(!output.contains("loaded"));
		assert!(output.contains("Foo"));
	}
}

#[test]
fn empty_corpus_generates_empty_sentences() {
	for mut text_maker in each_text_maker(2) {
		let tokenized = text_maker.train("").unwrap();
		assert!(tokenized.is_empty());
		assert!(text_maker.is_locked());

		let generated = text_maker.generate(5, &mut StdRng::seed_from_u64(0)).unwrap();
		assert_eq!(generated, vec![Sentence::new(); 5]);
	}
}

#[test]
fn unknown_seed_is_refused() {
	for mut text_maker in each_text_maker(2) {
		text_maker.train("a b c").unwrap();
		let result = text_maker.generate_with_seed(&sentence("zzz"), 1, &mut StdRng::seed_from_u64(0));
		assert!(matches!(result, Err(PressError::UnknownSeed(_))));
	}
}

#[test]
fn seeded_generation_continues_seed() {
	for mut text_maker in each_text_maker(1) {
		text_maker.train("a b c d").unwrap();
		let generated = text_maker
			.generate_with_seed(&sentence("b"), 3, &mut StdRng::seed_from_u64(0))
			.unwrap();
		assert_eq!(generated, vec![sentence("b c d"); 3]);
	}
}

#[test]
fn seed_leads_every_sentence_at_higher_orders() {
	for ngram_size in 2..5 {
		for mut text_maker in each_text_maker(ngram_size) {
			text_maker.train("a b c d").unwrap();
			let generated = text_maker
				.generate_with_seed(&sentence("b"), 1, &mut StdRng::seed_from_u64(4))
				.unwrap();
			let expected = match text_maker.strategy() {
				Strategy::Backoff => sentence("b c d"),
				// no backoff: the padded context of "b" alone was never seen
				Strategy::Crude => sentence("b"),
			};
			assert_eq!(generated, vec![expected], "{} at {ngram_size}", text_maker.strategy());
		}
	}
}

#[test]
fn clones_do_not_share_models() {
	for text_maker in each_text_maker(2) {
		let mut first = text_maker;
		let mut second = first.try_clone().unwrap();

		first.train("Foo bar baz .\nFoo bar quux .").unwrap();
		second
			.train("Input text for 2\nInput text does not go to 1\nclass does not share from 1")
			.unwrap();

		let mut rng = StdRng::seed_from_u64(11);
		let from_first = first.generate(10, &mut rng).unwrap();
		let from_second = second.generate(10, &mut rng).unwrap();

		assert!(vocabulary(&from_first).contains("Foo"));
		assert!(!vocabulary(&from_first).contains("Input"));
		assert!(vocabulary(&from_second).contains("Input"));
		assert!(!vocabulary(&from_second).contains("Foo"));
	}
}

#[test]
fn batch_sentences_are_independent() {
	let mut text_maker = TextMaker::new(Strategy::Backoff, 2).unwrap();
	text_maker.train("a b\nc d").unwrap();

	let generated = text_maker.generate(200, &mut StdRng::seed_from_u64(5)).unwrap();
	let distinct: HashSet<&Sentence> = generated.iter().collect();
	assert_eq!(distinct, HashSet::from([&sentence("a b"), &sentence("c d")]));
}

#[test]
fn first_token_follows_start_distribution() {
	let mut text_maker = TextMaker::new(Strategy::Backoff, 2).unwrap();
	text_maker.train(ZEN).unwrap();

	let table = text_maker.model().unwrap().table();
	let start = table.get(&[Token::Sentinel]).unwrap();
	let generated = text_maker.generate(100, &mut StdRng::seed_from_u64(8)).unwrap();
	for sentence in generated {
		let first = Token::from(sentence[0].as_str());
		assert!(start.probability(&first) > 0.0);
	}
}

#[test]
fn concurrent_readers_with_own_random_sources() {
	let mut text_maker = TextMaker::new(Strategy::Backoff, 3).unwrap();
	let tokenized = text_maker.train(ZEN).unwrap();
	let input = vocabulary(&tokenized);

	let text_maker = &text_maker;
	let outputs: Vec<Vec<Sentence>> = thread::scope(|scope| {
		let handles: Vec<_> = (0..4)
			.map(|seed| scope.spawn(move || text_maker.generate(100, &mut StdRng::seed_from_u64(seed)).unwrap()))
			.collect();
		handles.into_iter().map(|handle| handle.join().unwrap()).collect()
	});

	for output in &outputs {
		assert_eq!(output.len(), 100);
		assert!(vocabulary(output).is_subset(&input));
	}

	// same seed, same output
	let again = text_maker.generate(100, &mut StdRng::seed_from_u64(0)).unwrap();
	assert_eq!(again, outputs[0]);
}

#[test]
fn trained_model_round_trips_through_disk() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("zen.bin");

	for strategy in Strategy::ALL {
		let config = TextMakerConfig { strategy, ngram_size: 3, ..TextMakerConfig::default() };
		let mut text_maker = TextMaker::from_config(&config).unwrap();
		assert!(matches!(text_maker.save(&path), Err(PressError::NotTrained)));

		text_maker.train(ZEN).unwrap();
		text_maker.save(&path).unwrap();

		let loaded = TextMaker::load(&path, &config).unwrap();
		assert!(loaded.is_locked());
		assert_eq!(loaded.strategy(), strategy);
		assert_eq!(loaded.ngram_size(), 3);
		assert_eq!(loaded.model().unwrap(), text_maker.model().unwrap());

		let expected = text_maker.generate(20, &mut StdRng::seed_from_u64(2)).unwrap();
		let actual = loaded.generate(20, &mut StdRng::seed_from_u64(2)).unwrap();
		assert_eq!(actual, expected);
	}
}

#[test]
fn text_file_is_trained_once_then_cached() {
	let dir = tempfile::tempdir().unwrap();
	let text_path = dir.path().join("zen.txt");
	std::fs::write(&text_path, ZEN).unwrap();

	let config = TextMakerConfig::default();
	let trained = TextMaker::from_text_file(&text_path, &config).unwrap();
	let binary_path = dir.path().join("zen.bin");
	assert!(binary_path.exists());

	// The cache wins over the text from now on
	std::fs::write(&text_path, "Something else entirely").unwrap();
	let cached = TextMaker::from_text_file(&text_path, &config).unwrap();
	assert_eq!(cached.model().unwrap(), trained.model().unwrap());

	let bytes = std::fs::read(&binary_path).unwrap();
	assert_eq!(&Model::from_bytes(&bytes).unwrap(), trained.model().unwrap());
}

#[test]
fn missing_text_file_is_an_io_error() {
	let dir = tempfile::tempdir().unwrap();
	let result = TextMaker::from_text_file(dir.path().join("missing.txt"), &TextMakerConfig::default());
	assert!(matches!(result, Err(PressError::Io(_))));
}
