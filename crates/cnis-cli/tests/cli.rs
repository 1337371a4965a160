use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STATEMENT: &str = "\
NIT: 123.45678.90-1 CPF: 123.456.789-00 Nome: MARIA DA SILVA Data de nascimento: 01/01/1970
Relações Previdenciárias
1 12.345.678/9012-34 ACME LTDA Empregado
Público 01/03/2010 28/02/2015
2 98.765.432/0001-10 AUXILIO DOENCA Empregado
Público 01/03/2015 30/06/2015
Legenda
";

fn cnis() -> Command {
    Command::cargo_bin("cnis").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn process_text_statement_to_json() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "extrato.txt", STATEMENT);

    let output = cnis().arg("process").arg(&input).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["client_name"], "Maria Da Silva");
    assert_eq!(value["data"]["client_cpf"], "123.456.789-00");

    let records = value["data"]["vinculos_empregaticios"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["empregador"], "ACME LTDA");
    assert_eq!(records[0]["data_fim"], "28/02/2015");
}

#[test]
fn process_csv_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "extrato.txt", STATEMENT);
    let out = dir.path().join("out.csv");

    cnis()
        .args(["process", "--format", "csv", "--output"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("empregador,cnpj,data_inicio,data_fim"));
    assert!(csv.contains("ACME LTDA,12.345.678/9012-34,01/03/2010,28/02/2015"));
}

#[test]
fn process_empty_statement_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "vazio.txt", "   \n");

    cnis()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""success":false"#))
        .stderr(predicate::str::contains("no text could be extracted from the document"));
}

#[test]
fn process_missing_and_unsupported_inputs() {
    let dir = TempDir::new().unwrap();

    cnis()
        .args(["process", "/nonexistent/extrato.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));

    let input = write(&dir, "extrato.docx", STATEMENT);
    cnis()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.txt", STATEMENT);
    write(&dir, "b.txt", "");
    let out_dir = dir.path().join("out");
    let pattern = dir.path().join("*.txt");

    cnis()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out_dir)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    assert!(out_dir.join("a.json").exists());
    assert!(!out_dir.join("b.json").exists());

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success,Maria Da Silva,123.456.789-00,1,"));
    assert!(summary.contains("b.txt,error"));
}

#[test]
fn batch_stops_on_first_error_by_default() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.txt", "");
    let pattern = dir.path().join("*.txt");

    cnis()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn notice_prints_protocol_and_dispatch() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "despacho.txt",
        "Protocolo: 123456789\nServiço: Aposentadoria por Idade\nPrezado Senhor,\nSeu requerimento foi deferido.\n",
    );

    let output = cnis().arg("notice").arg(&input).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["protocolo"], "123456789");
    assert_eq!(value["servico"], "Aposentadoria por Idade");
    assert_eq!(value["despacho"][1], "Seu requerimento foi deferido.");
}

#[test]
fn config_init_set_get_with_explicit_path() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    cnis()
        .args(["config", "init", "--config"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    cnis()
        .args(["config", "init", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cnis()
        .args(["config", "set", "notice.similarity_threshold", "0.9", "--config"])
        .arg(&config)
        .assert()
        .success();

    cnis()
        .args(["config", "get", "notice.similarity_threshold", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("0.9"));

    cnis()
        .args(["config", "get", "notice.nope", "--config"])
        .arg(&config)
        .assert()
        .failure();
}

#[test]
fn process_honors_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "extrato.txt", STATEMENT);
    let config = write(&dir, "config.json", r#"{"extraction": {"title_case_names": false}}"#);

    let output = cnis()
        .arg("process")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["data"]["client_name"], "MARIA DA SILVA");
}
