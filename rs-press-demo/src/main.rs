use log::info;

use rs_press_core::io;
use rs_press_core::model::Strategy;
use rs_press_core::text::{JoinerKind, TextMaker, TextMakerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Strategy can be picked by nickname: "backoff" (default) or "crude"
    let strategy: Strategy = match std::env::args().nth(1) {
        Some(name) => name.parse()?,
        None => Strategy::default(),
    };

    let config = TextMakerConfig {
        strategy,
        // Maximum number of previous words a generated word depends on
        ngram_size: 2,
        // One generated sentence per line
        joiner: JoinerKind::Newline,
        ..TextMakerConfig::default()
    };

    // Train on every .txt file of the "data" directory
    // A .bin model is cached next to each file and reused on the next run
    let mut rng = rand::rng();
    for corpus in io::list_corpora("./data")? {
        let mut text_maker = TextMaker::from_text_file(&corpus, &config)?;
        let name = io::corpus_name(&corpus)?;
        info!("{}: {} model, ngram_size={}", name, text_maker.strategy(), text_maker.ngram_size());

        let sentences = text_maker.generate(5, &mut rng)?;
        println!("== {} ==\n{}", name, text_maker.join(&sentences, true));

        // A seeded sentence starts with the seed and continues from its last word
        let seed = vec!["Simple".to_owned(), "is".to_owned()];
        match text_maker.generate_with_seed(&seed, 1, &mut rng) {
            Ok(sentences) => println!("{}", text_maker.join(&sentences, true)),
            Err(e) => println!("{e}"),
        }

        // A trained text maker is locked
        match text_maker.set_ngram_size(3) {
            Ok(_) => println!("Should not happen"),
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}
