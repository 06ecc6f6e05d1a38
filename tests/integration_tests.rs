use anyhow::Result;
use std::fs;
use tempfile::TempDir;

use linesift::external_sort::{sort_file, ExternalSortConfig, SortOutcome};
use linesift::generator::{generate_file, GeneratorConfig};
use linesift::storage::OsStorage;
use linesift::LineRecord;

fn test_config(temp_dir: &TempDir, max_lines_per_chunk: usize) -> ExternalSortConfig {
    ExternalSortConfig {
        max_lines_per_chunk,
        temp_directory: temp_dir.path().join("temp"),
        ..ExternalSortConfig::default()
    }
}

fn assert_completed(outcome: SortOutcome) {
    assert!(matches!(outcome, SortOutcome::Completed(_)));
}

#[tokio::test]
async fn test_multi_chunk_sort_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("input.txt");
    let output = temp_dir.path().join("output.txt");

    fs::write(
        &input,
        "415. Apple\n30432. Something something something\n1. Apple\n32. Cherry is the best\n2. Banana is yellow\n",
    )?;

    let outcome = sort_file(&input, &output, test_config(&temp_dir, 2)).await?;
    assert_completed(outcome);

    let sorted = fs::read_to_string(&output)?;
    assert_eq!(
        sorted,
        "1. Apple\n415. Apple\n2. Banana is yellow\n32. Cherry is the best\n30432. Something something something\n"
    );

    // Chunk files are transient; none survive a successful sort.
    let leftovers: Vec<_> = fs::read_dir(temp_dir.path().join("temp"))?.collect();
    assert!(leftovers.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_empty_file_copies_byte_for_byte() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("input.txt");
    let output = temp_dir.path().join("output.txt");
    fs::write(&input, "")?;

    sort_file(&input, &output, test_config(&temp_dir, 1_000)).await?;

    assert_eq!(fs::read(&output)?, b"");
    Ok(())
}

#[tokio::test]
async fn test_missing_input_reports_noop() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("does_not_exist.txt");
    let output = temp_dir.path().join("output.txt");

    let outcome = sort_file(&input, &output, test_config(&temp_dir, 1_000)).await?;

    assert!(matches!(outcome, SortOutcome::MissingInput));
    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_generate_then_sort_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("generated.txt");
    let output = temp_dir.path().join("sorted.txt");

    let generator_config = GeneratorConfig {
        size_mb: 0.02,
        ..GeneratorConfig::default()
    };
    let report = generate_file(&OsStorage, &input, &generator_config)?;
    assert!(report.lines_written > 500);

    // Small chunk capacity so the generated file spans many chunks.
    let outcome = sort_file(&input, &output, test_config(&temp_dir, 200)).await?;
    match outcome {
        SortOutcome::Completed(stats) => {
            assert_eq!(stats.total_records, report.lines_written);
            assert!(stats.chunks_created >= 2);
        }
        SortOutcome::MissingInput => panic!("input was just generated"),
    }

    let mut input_records: Vec<LineRecord> = fs::read_to_string(&input)?
        .lines()
        .map(|l| LineRecord::parse(l).unwrap())
        .collect();
    let output_records: Vec<LineRecord> = fs::read_to_string(&output)?
        .lines()
        .map(|l| LineRecord::parse(l).unwrap())
        .collect();

    assert!(output_records.windows(2).all(|w| w[0] <= w[1]));

    input_records.sort();
    assert_eq!(output_records, input_records);

    Ok(())
}

#[tokio::test]
async fn test_sorting_sorted_output_is_byte_identical() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("input.txt");
    let once = temp_dir.path().join("once.txt");
    let twice = temp_dir.path().join("twice.txt");

    fs::write(&input, "9. fig\n3. apple\n7. apple\n5. date\n")?;

    sort_file(&input, &once, test_config(&temp_dir, 2)).await?;
    sort_file(&once, &twice, test_config(&temp_dir, 2)).await?;

    assert_eq!(fs::read(&once)?, fs::read(&twice)?);
    Ok(())
}
