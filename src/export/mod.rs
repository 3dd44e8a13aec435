use crate::cli::ExportFormat;
use crate::error::{HeatmapError, Result};
use fanout_heatmap_common::export::{
    ExcelBackend, GapsCsvBackend, HtmlBackend, JsonBackend, TextBackend,
};
use fanout_heatmap_common::{Report, ReportBackend};
use std::path::{Path, PathBuf};

/// タイトルをファイル名に使える形にする
fn file_stem_for(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

/// 出力先パスを決定
///
/// ディレクトリ（または拡張子なし）ならタイトルから命名、
/// ファイル指定で複数形式を出す場合は同じ stem で拡張子だけ変える。
fn output_path_for_format(output: &Path, title: &str, extension: &str, multiple: bool) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", file_stem_for(title), extension))
    } else if multiple {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| file_stem_for(title));
        parent.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

/// 出力形式に対応するバックエンド
pub fn backend_for(format: ExportFormat, title: &str) -> Result<Box<dyn ReportBackend>> {
    let backend: Box<dyn ReportBackend> = match format {
        ExportFormat::Html => Box::new(HtmlBackend {
            title: title.to_string(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        }),
        ExportFormat::Excel => Box::new(ExcelBackend {
            title: title.to_string(),
        }),
        ExportFormat::Json => Box::new(JsonBackend),
        ExportFormat::Text => Box::new(TextBackend),
        ExportFormat::Gaps => Box::new(GapsCsvBackend),
        ExportFormat::All => {
            return Err(HeatmapError::Export("all は個別形式に展開してください".into()))
        }
    };
    Ok(backend)
}

/// レポートを書き出し、出力したパスを返す
pub fn export_report(
    report: &Report,
    format: &ExportFormat,
    output: &Path,
    title: &str,
) -> Result<Vec<PathBuf>> {
    let formats = format.expand();
    let multiple = formats.len() > 1;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if output.extension().is_some() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if output.extension().is_none() && !output.exists() {
        std::fs::create_dir_all(output)?;
    }

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let backend = backend_for(format, title)?;
        let output_path = output_path_for_format(output, title, backend.extension(), multiple);

        println!("- {}を生成中...", backend.name());
        let bytes = backend.render(report)?;
        std::fs::write(&output_path, bytes)?;
        println!("✔ {}出力: {}", backend.name(), output_path.display());

        tracing::debug!(format = %format, path = %output_path.display(), "exported");
        written.push(output_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_for() {
        assert_eq!(file_stem_for("Fan-Out Heatmap"), "Fan-Out Heatmap");
        assert_eq!(file_stem_for("a/b:c"), "a_b_c");
    }

    #[test]
    fn test_output_path_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path_for_format(dir.path(), "Heatmap", "html", false);
        assert_eq!(path, dir.path().join("Heatmap.html"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for_format(Path::new("out/report.html"), "Heatmap", "html", false);
        assert_eq!(path, PathBuf::from("out/report.html"));

        let path = output_path_for_format(Path::new("out/report.html"), "Heatmap", "xlsx", true);
        assert_eq!(path, PathBuf::from("out/report.xlsx"));
    }

    #[test]
    fn test_backend_for_all_is_rejected() {
        assert!(backend_for(ExportFormat::All, "t").is_err());
        assert_eq!(backend_for(ExportFormat::Gaps, "t").unwrap().extension(), "csv");
    }
}
