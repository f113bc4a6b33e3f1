/// English function words excluded from both documents and queries.
pub const STOP_WORDS: [&str; 39] = [
	"the","a","an","and","or","but","if","then","else","when","what","how","why",
	"to","of","in","on","for","with","at","by","from","as",
	"is","are","was","were","be","been","being",
	"this","that","these","those","it","its","we","you","your",
];

pub fn is_stopword(term: &str) -> bool { STOP_WORDS.contains(&term) }
