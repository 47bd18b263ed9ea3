use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Extension of plain-text corpora.
pub const CORPUS_EXTENSION: &str = "txt";

/// Extension of cached trained models.
pub const MODEL_EXTENSION: &str = "bin";

/// Reads a whole text file into memory.
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Path of the model cached for a corpus: same folder, same stem,
/// [`MODEL_EXTENSION`] (`data/zen.txt` is cached as `data/zen.bin`).
pub fn model_cache_path<P: AsRef<Path>>(corpus_path: P) -> io::Result<PathBuf> {
	let corpus_path = corpus_path.as_ref();
	if corpus_path.file_stem().is_none() {
		return Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("no corpus file name in '{}'", corpus_path.display()),
		));
	}
	Ok(corpus_path.with_extension(MODEL_EXTENSION))
}

/// Short name of a corpus, used in logs: its file stem.
pub fn corpus_name<P: AsRef<Path>>(corpus_path: P) -> io::Result<String> {
	let corpus_path = corpus_path.as_ref();
	corpus_path
		.file_stem()
		.and_then(|stem| stem.to_str())
		.map(str::to_owned)
		.ok_or_else(|| {
			io::Error::new(
				io::ErrorKind::InvalidInput,
				format!("no usable corpus name in '{}'", corpus_path.display()),
			)
		})
}

/// Lists the corpora of a directory: regular files with [`CORPUS_EXTENSION`],
/// sorted by path.
pub fn list_corpora<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
	let mut corpora = Vec::new();
	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension().is_some_and(|extension| extension == CORPUS_EXTENSION) {
			corpora.push(path);
		}
	}
	corpora.sort();
	Ok(corpora)
}
