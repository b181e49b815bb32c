use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tripletbank::config::Tokenization;
use tripletbank::data::corpus::{self, CorpusError};
use tripletbank::data::dataset::{PairDataset, TripletDataset};
use tripletbank::encoder::SentenceEncoder;
use tripletbank::schema::Schema;
use tripletbank::vocab::Vocabulary;

struct Fixture {
    dir: TempDir,
    schema: Schema,
    encoder: SentenceEncoder,
}

fn fixture(vocab_tokens: &[&str], schema_json: &str, max_length: usize) -> Fixture {
    let dir = TempDir::new().unwrap();
    let vocab_path = dir.path().join("chars.txt");
    fs::write(&vocab_path, vocab_tokens.join("\n")).unwrap();
    let schema_path = dir.path().join("schema.json");
    fs::write(&schema_path, schema_json).unwrap();

    let vocab = Vocabulary::from_file(&vocab_path).unwrap();
    let schema = Schema::from_file(&schema_path).unwrap();
    let encoder = SentenceEncoder::new(vocab, Tokenization::Char, max_length);
    Fixture {
        dir,
        schema,
        encoder,
    }
}

fn corpus_file(fixture: &Fixture, name: &str, lines: &[&str]) -> PathBuf {
    let path = fixture.dir.path().join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

#[test]
fn test_training_record_populates_bank_under_its_class_id() {
    let f = fixture(
        &["[UNK]", "改", "下", "畅", "聊", "套", "餐"],
        r#"{"畅聊套餐变更": 0, "话费查询": 1}"#,
        8,
    );
    let path = corpus_file(
        &f,
        "train.json",
        &[r#"{"questions": ["改下畅聊套餐"], "target": "畅聊套餐变更"}"#],
    );

    let bank = corpus::load_knowledge_bank(&path, &f.schema, &f.encoder).unwrap();
    assert_eq!(bank.num_classes(), 1);
    assert_eq!(bank.num_examples(), 1);
    let examples = bank.examples(0).unwrap();
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0], f.encoder.encode("改下畅聊套餐"));
}

#[test]
fn test_every_question_in_a_record_is_encoded() {
    let f = fixture(
        &["[UNK]", "话", "费"],
        r#"{"话费查询": 1}"#,
        4,
    );
    let path = corpus_file(
        &f,
        "train.json",
        &[r#"{"questions": ["话费", "查话费", "费用"], "target": "话费查询"}"#],
    );

    let bank = corpus::load_knowledge_bank(&path, &f.schema, &f.encoder).unwrap();
    assert_eq!(bank.num_examples(), 3);
    assert_eq!(bank.examples(1).unwrap().len(), 3);
}

#[test]
fn test_evaluation_line_becomes_one_pair() {
    let f = fixture(
        &["[UNK]", "话", "费"],
        r#"{"畅聊套餐变更": 0, "话费查询": 1}"#,
        4,
    );
    let path = corpus_file(&f, "valid.json", &[r#"["话费", "话费查询"]"#]);

    let pairs = corpus::load_labeled_pairs(&path, &f.schema, &f.encoder).unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].input_ids, f.encoder.encode("话费"));
    assert_eq!(pairs[0].class_id, 1);
}

#[test]
fn test_unknown_label_is_fatal_with_line_number() {
    let f = fixture(&["[UNK]"], r#"{"话费查询": 1}"#, 4);

    let train = corpus_file(
        &f,
        "train.json",
        &[
            r#"{"questions": ["话费"], "target": "话费查询"}"#,
            r#"{"questions": ["套餐"], "target": "不存在的意图"}"#,
        ],
    );
    match corpus::load_knowledge_bank(&train, &f.schema, &f.encoder) {
        Err(CorpusError::UnknownLabel { line, label }) => {
            assert_eq!(line, 2);
            assert_eq!(label, "不存在的意图");
        }
        other => panic!("expected UnknownLabel, got {:?}", other),
    }

    let eval = corpus_file(&f, "valid.json", &[r#"["话费", "不存在的意图"]"#]);
    assert!(matches!(
        corpus::load_labeled_pairs(&eval, &f.schema, &f.encoder),
        Err(CorpusError::UnknownLabel { line: 1, .. })
    ));
}

#[test]
fn test_off_shape_lines_are_fatal() {
    let f = fixture(&["[UNK]"], r#"{"话费查询": 1}"#, 4);

    // A training-shaped object in an evaluation file
    let eval = corpus_file(
        &f,
        "valid.json",
        &[
            r#"["话费", "话费查询"]"#,
            r#"{"questions": ["话费"], "target": "话费查询"}"#,
        ],
    );
    assert!(matches!(
        corpus::load_labeled_pairs(&eval, &f.schema, &f.encoder),
        Err(CorpusError::Parse { line: 2, .. })
    ));

    // An evaluation-shaped array in a training file
    let train = corpus_file(&f, "train.json", &[r#"["话费", "话费查询"]"#]);
    assert!(matches!(
        corpus::load_knowledge_bank(&train, &f.schema, &f.encoder),
        Err(CorpusError::Parse { line: 1, .. })
    ));
}

#[test]
fn test_blank_lines_are_skipped() {
    let f = fixture(&["[UNK]", "话", "费"], r#"{"话费查询": 1}"#, 4);
    let path = corpus_file(
        &f,
        "valid.json",
        &[r#"["话费", "话费查询"]"#, "", r#"["费", "话费查询"]"#],
    );

    let pairs = corpus::load_labeled_pairs(&path, &f.schema, &f.encoder).unwrap();
    assert_eq!(pairs.len(), 2);
}

#[test]
fn test_training_length_is_the_configured_virtual_size() {
    let f = fixture(
        &["[UNK]", "a", "b"],
        r#"{"one": 0, "two": 1}"#,
        4,
    );
    let path = corpus_file(
        &f,
        "train.json",
        &[
            r#"{"questions": ["aa", "ab"], "target": "one"}"#,
            r#"{"questions": ["bb", "ba"], "target": "two"}"#,
        ],
    );
    let bank = corpus::load_knowledge_bank(&path, &f.schema, &f.encoder).unwrap();

    let dataset = TripletDataset::new(bank, 200).unwrap();
    assert_eq!(dataset.len(), 200);
}

#[test]
fn test_evaluation_length_is_the_literal_pair_count() {
    let f = fixture(&["[UNK]", "话"], r#"{"话费查询": 1}"#, 4);
    let path = corpus_file(
        &f,
        "valid.json",
        &[
            r#"["话", "话费查询"]"#,
            r#"["话话", "话费查询"]"#,
            r#"["话话话", "话费查询"]"#,
        ],
    );
    let pairs = corpus::load_labeled_pairs(&path, &f.schema, &f.encoder).unwrap();

    let dataset = PairDataset::new(pairs);
    assert_eq!(dataset.len(), 3);
    assert!(dataset.get(0).is_some());
    assert!(dataset.get(3).is_none());
}

#[test]
fn test_triplet_members_come_from_the_right_classes() {
    // Phrasings lead with their class letter, so the first id names the class.
    let f = fixture(
        &["[UNK]", "a", "b"],
        r#"{"one": 0, "two": 1}"#,
        4,
    );
    let path = corpus_file(
        &f,
        "train.json",
        &[
            r#"{"questions": ["aa", "ab"], "target": "one"}"#,
            r#"{"questions": ["bb", "ba"], "target": "two"}"#,
        ],
    );
    let bank = corpus::load_knowledge_bank(&path, &f.schema, &f.encoder).unwrap();
    let dataset = TripletDataset::new(bank, 10).unwrap();

    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let triplet = dataset.get_with(&mut rng).unwrap();
        assert_eq!(triplet.anchor.len(), 4);
        assert_eq!(triplet.positive.len(), 4);
        assert_eq!(triplet.negative.len(), 4);
        assert_eq!(triplet.anchor[0], triplet.positive[0]);
        assert_ne!(triplet.anchor, triplet.positive);
        assert_ne!(triplet.negative[0], triplet.anchor[0]);
    }

    // Thread-local draws work too
    assert!(dataset.get(0).is_ok());
}
