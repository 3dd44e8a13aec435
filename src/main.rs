use clap::Parser;
use dialoguer::Select;
use fanout_heatmap::{cli, config, error, export, loader, logging, pipeline};
use fanout_heatmap_common::export::text_core;
use fanout_heatmap_common::report::{format_share, format_thousands};
use fanout_heatmap_common::{Assistant, Report};
use cli::{Cli, Commands, ExportFormat};
use config::Config;
use error::{HeatmapError, Result};
use std::io::Write;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Report { input, format, output, title } => {
            println!("🔥 fanout-heatmap - 掲載順位ヒートマップ\n");

            // 1. 読み込み
            println!("[1/3] ファイルを読み込み中...");
            let candidates = loader::load_candidates(&input.fanout)?;
            let observed = loader::load_observed(&input.gsc)?;
            println!(
                "✔ Fan-Out {}件 / Search Console {}件\n",
                candidates.len(),
                observed.len()
            );

            // 2. 照合
            println!("[2/3] クエリを照合中...");
            let records = pipeline::join_tables(&candidates, &observed, &config.policy);
            let report = Report::build(records, &config.report);
            print_summary(&report);

            // 3. 出力
            println!("[3/3] 出力中...");
            let format = match format {
                Some(format) => format,
                None => config.default_format()?,
            };
            let title = title.unwrap_or_else(|| config.title.clone());

            if format == ExportFormat::Text && output.is_none() {
                println!("{}", text_core::render_table(&report));
            } else {
                let output = output.unwrap_or_else(|| std::path::PathBuf::from("."));
                export::export_report(&report, &format, &output, &title)?;
            }

            println!("\n✅ 完了");
        }

        Commands::Prompt { input, assistant, pick, output } => {
            let report = pipeline::build_report(&input.fanout, &input.gsc, &config)?;

            let assistant = if pick { Some(pick_assistant()?) } else { assistant };

            println!("{}", report.brief);

            if let Some(path) = output {
                std::fs::write(&path, &report.brief)?;
                println!("\n✔ 依頼文を保存: {}", path.display());
            }

            match assistant {
                Some(assistant) => {
                    println!("\n→ {} に貼り付けてください: {}", assistant.name(), assistant.url());
                }
                None => {
                    println!();
                    for assistant in Assistant::ALL {
                        println!("  {:<11} {}", assistant.name(), assistant.url());
                    }
                }
            }
        }

        Commands::Gaps { input, output } => {
            let report = pipeline::build_report(&input.fanout, &input.gsc, &config)?;
            let csv = fanout_heatmap_common::export::csv_core::gaps_csv(&report.records)?;

            // 標準出力はCSV本体のみ
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    eprintln!("✔ {}件のギャップを出力: {}", report.summary.gaps, path.display());
                }
                None => std::io::stdout().write_all(&csv)?,
            }
        }

        Commands::Config {
            show,
            min_similarity,
            max_length_delta,
            min_score,
            gap_preview_limit,
            default_format,
            reset,
        } => {
            let mut config = if reset { Config::default() } else { config };
            let mut changed = reset;

            if let Some(value) = min_similarity {
                config.policy.min_similarity = value;
                changed = true;
            }
            if let Some(value) = max_length_delta {
                config.policy.max_length_delta = value;
                changed = true;
            }
            if let Some(value) = min_score {
                config.policy.min_score = value;
                changed = true;
            }
            if let Some(value) = gap_preview_limit {
                config.report.gap_preview_limit = value;
                changed = true;
            }
            if let Some(format) = default_format {
                config.default_format = format.to_string();
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  一致率の閾値: {}", config.policy.min_similarity);
                println!("  文字数差の上限: {}", config.policy.max_length_delta);
                println!("  採用スコアの下限: {}", config.policy.min_score);
                println!("  ギャップ列挙件数: {}", config.report.gap_preview_limit);
                println!("  既定の出力形式: {}", config.default_format);
                println!("  タイトル: {}", config.title);
            }
        }
    }

    Ok(())
}

/// 集計結果の要約表示
fn print_summary(report: &Report) {
    let summary = &report.summary;
    println!(
        "✔ {}件中 {}件が掲載 ({}) / ギャップ {}件 ({})",
        summary.total,
        summary.ranking,
        format_share(summary.ranking_share()),
        summary.gaps,
        format_share(summary.gap_share()),
    );
    println!(
        "  上位3位: {}件 / 上位10位: {}件 / 総クリック: {}\n",
        summary.top3,
        summary.top10,
        format_thousands(summary.total_clicks),
    );
}

/// 貼り付け先を対話的に選択
fn pick_assistant() -> Result<Assistant> {
    let names: Vec<&str> = Assistant::ALL.iter().map(|a| a.name()).collect();
    let index = Select::new()
        .with_prompt("貼り付け先のAIアシスタント")
        .items(&names)
        .default(0)
        .interact()
        .map_err(|e| HeatmapError::Interactive(e.to_string()))?;
    Ok(Assistant::ALL[index])
}
