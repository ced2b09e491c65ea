// crates/nzg_grid/src/ntv2.rs

//! NTv2 ASCII 格网文件读写
//!
//! 只支持单个子格网、以角秒为单位（`GS_TYPE SECONDS`）的文本格式。
//! 每条头记录前 8 个字符为关键字，其余为值。
//!
//! 文件中的经度以西经为正，读入时取反转为东经为正；数据记录按纬度升序，
//! 同一纬度内从东向西排列。
//!
//! # 示例
//!
//! ```
//! use nzg_grid::ntv2::{parse_ntv2_ascii, write_ntv2_ascii};
//! use nzg_grid::{GridExtent, ShiftGrid};
//!
//! let extent = GridExtent { lat0: -42.0, lat1: -41.0, dlat: 1.0, lon0: 173.0, lon1: 174.0, dlon: 1.0 };
//! let grid = ShiftGrid::from_fn(extent, "NZGD49", "NZGD2000", |_, _| [0.001, 0.002]).unwrap();
//!
//! let mut text = Vec::new();
//! write_ntv2_ascii(&grid, &mut text).unwrap();
//! let back = parse_ntv2_ascii(text.as_slice(), "memory").unwrap();
//! assert_eq!(back.nlat(), 2);
//! assert_eq!(back.datum_to(), "NZGD2000");
//! ```

use crate::grid::{GridExtent, ShiftGrid, ALLOC_FAILED};
use nzg_foundation::{NzError, NzResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 角秒 -> 度
const SECONDS_TO_DEGREES: f64 = 1.0 / 3600.0;
/// 关键字宽度
const KEY_WIDTH: usize = 8;
/// 基准名称最大长度
const MAX_DATUM_LEN: usize = 15;
/// 紧密排列的数据记录中每个字段的宽度
const DATA_FIELD_WIDTH: usize = 10;
/// 子格网头最少记录数
const MIN_SUB_RECORDS: i64 = 7;

// ============================================================================
// 行读取
// ============================================================================

/// 带行号的逐行读取器
struct RecordReader<R> {
    inner: R,
    source: PathBuf,
    line: usize,
}

impl<R: BufRead> RecordReader<R> {
    fn new(inner: R, source: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            source: source.into(),
            line: 0,
        }
    }

    /// 读取下一行（去除行尾换行），文件结束时返回 `None`
    fn next_line(&mut self) -> NzResult<Option<String>> {
        let mut buf = String::new();
        let n = self.inner.read_line(&mut buf).map_err(|e| {
            NzError::io_with_source(format!("Failed to read {}: {e}", self.source.display()), e)
        })?;
        if n == 0 {
            return Ok(None);
        }
        self.line += 1;
        let len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(len);
        Ok(Some(buf))
    }

    fn error(&self, message: impl Into<String>) -> NzError {
        NzError::parse(&self.source, self.line, message)
    }
}

/// 拆分为 (关键字, 值)，关键字去除尾部空白
fn split_record(line: &str) -> (&str, &str) {
    match line.get(..KEY_WIDTH) {
        Some(key) => (key.trim_end(), &line[KEY_WIDTH..]),
        None => (line.trim_end(), ""),
    }
}

/// 解析整数值，允许 `11.000` 这类写法
fn parse_int(value: &str) -> Option<i64> {
    let token = value.split_whitespace().next()?;
    token.parse::<i64>().ok().or_else(|| {
        token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

/// 解析浮点值
fn parse_float(value: &str) -> Option<f64> {
    value
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// 从字符串开头读取一个浮点数，跳过前导空白
///
/// 以空白分隔的字段整体解析；紧密排列的定宽字段则至多取 `width` 个字符。
fn scan_float(s: &str, width: usize) -> Option<(f64, &str)> {
    let s = s.trim_start();
    let token_end = s.find(char::is_whitespace).unwrap_or(s.len());
    if let Ok(v) = s[..token_end].parse::<f64>() {
        return v.is_finite().then_some((v, &s[token_end..]));
    }

    let mut end = 0;
    let mut prev = '\0';
    for (i, c) in s.char_indices() {
        if i >= width {
            break;
        }
        let ok = c.is_ascii_digit()
            || c == '.'
            || c == 'e'
            || c == 'E'
            || ((c == '+' || c == '-') && (i == 0 || prev == 'e' || prev == 'E'));
        if !ok {
            break;
        }
        end = i + c.len_utf8();
        prev = c;
    }
    let value = s[..end].parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((value, &s[end..]))
}

/// 基准名称：去除首尾空白，截断到 15 个字符
fn datum_name(value: &str) -> String {
    value
        .trim()
        .chars()
        .take(MAX_DATUM_LEN)
        .collect::<String>()
        .trim_end()
        .to_string()
}

// ============================================================================
// 读取
// ============================================================================

/// 从文件加载 NTv2 ASCII 格网
///
/// # Errors
///
/// 文件不存在、无法读取或格式错误
pub fn load_ntv2_ascii(path: impl AsRef<Path>) -> NzResult<ShiftGrid> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NzError::file_not_found(path));
    }
    let file = File::open(path).map_err(|e| {
        NzError::io_with_source(format!("Cannot open grid data file {}", path.display()), e)
    })?;

    let grid = parse_records(BufReader::new(file), path)?;
    info!(
        "加载格网 {}: {}x{} 格点, {} -> {}",
        path.display(),
        grid.nlat(),
        grid.nlon(),
        grid.datum_from(),
        grid.datum_to()
    );
    Ok(grid)
}

/// 从任意读取器解析 NTv2 ASCII 格网，`name` 用于错误信息
pub fn parse_ntv2_ascii<R: BufRead>(reader: R, name: &str) -> NzResult<ShiftGrid> {
    parse_records(reader, Path::new(name))
}

fn parse_records<R: BufRead>(reader: R, source: &Path) -> NzResult<ShiftGrid> {
    let mut rd = RecordReader::new(reader, source);

    let (datum_from, datum_to, nsrec) = read_overview_header(&mut rd)?;
    let (extent, gs_count) = read_sub_header(&mut rd, nsrec)?;

    let (nlat, nlon) = extent.dimensions();
    let count = extent.node_count().and_then(|n| i64::try_from(n).ok());
    if count != Some(gs_count) {
        return Err(rd.error("GS_COUNT does not match calculated grid dimensions"));
    }
    debug!("子格网 {}x{}，GS_COUNT={}", nlat, nlon, gs_count);

    let shifts = read_grid_data(&mut rd, nlat, nlon)?;
    ShiftGrid::new(extent, datum_from, datum_to, shifts)
}

/// 读取总头，返回 (源基准, 目标基准, NUM_SREC)
fn read_overview_header<R: BufRead>(
    rd: &mut RecordReader<R>,
) -> NzResult<(String, String, i64)> {
    let norec = match rd.next_line()? {
        Some(line) => {
            let (key, value) = split_record(&line);
            if key == "NUM_OREC" {
                parse_int(value).filter(|&n| n >= 1)
            } else {
                None
            }
        }
        None => None,
    };
    let norec = norec.ok_or_else(|| rd.error("Invalid file header - no NUM_OREC record"))?;

    let mut nfile: Option<i64> = None;
    let mut nsrec: Option<i64> = None;
    let mut is_seconds = false;
    let mut datum_from = String::new();
    let mut datum_to = String::new();

    for _ in 1..norec {
        let Some(line) = rd.next_line()? else {
            return Err(rd.error("Grid file truncated - header incomplete"));
        };
        let (key, value) = split_record(&line);
        match key {
            "NUM_SREC" => match parse_int(value) {
                Some(n) if n >= MIN_SUB_RECORDS => nsrec = Some(n),
                _ => return Err(rd.error("Invalid NUM_SREC record")),
            },
            "NUM_FILE" => match parse_int(value) {
                Some(1) => nfile = Some(1),
                Some(n) if n > 1 => {
                    return Err(rd.error("Grid file contains multiple grids - not supported"))
                }
                _ => return Err(rd.error("Invalid NUM_FILE record")),
            },
            "GS_TYPE" => {
                if value.trim_start().starts_with("SECONDS") {
                    is_seconds = true;
                } else {
                    return Err(rd.error("Unsupported GS_TYPE in grid file - must be SECONDS"));
                }
            }
            "SYSTEM_F" => datum_from = datum_name(value),
            "SYSTEM_T" => datum_to = datum_name(value),
            _ => {}
        }
    }

    let Some(nsrec) = nsrec else {
        return Err(rd.error("Missing NUM_SREC record in grid file header"));
    };
    if nfile.is_none() {
        return Err(rd.error("Missing NUM_FILE record in grid file header"));
    }
    if !is_seconds {
        return Err(rd.error("Missing GS_TYPE record in grid file header"));
    }

    Ok((datum_from, datum_to, nsrec))
}

/// 读取子格网头，返回 (范围, GS_COUNT)
fn read_sub_header<R: BufRead>(
    rd: &mut RecordReader<R>,
    nsrec: i64,
) -> NzResult<(GridExtent, i64)> {
    let mut s_lat = None;
    let mut n_lat = None;
    let mut e_long = None;
    let mut w_long = None;
    let mut lat_inc = None;
    let mut long_inc = None;
    let mut gs_count = None;

    for _ in 0..nsrec {
        let Some(line) = rd.next_line()? else {
            return Err(rd.error("Grid file truncated - sub grid header incomplete"));
        };
        let (key, value) = split_record(&line);
        let (slot, positive) = match key {
            "S_LAT" => (&mut s_lat, false),
            "N_LAT" => (&mut n_lat, false),
            "E_LONG" => (&mut e_long, false),
            "W_LONG" => (&mut w_long, false),
            "LAT_INC" => (&mut lat_inc, true),
            "LONG_INC" => (&mut long_inc, true),
            "GS_COUNT" => {
                match parse_int(value) {
                    Some(n) if n > 0 => gs_count = Some(n),
                    _ => return Err(rd.error("Invalid GS_COUNT record in sub grid header")),
                }
                continue;
            }
            _ => continue,
        };
        match parse_float(value) {
            Some(v) if !positive || v > 0.0 => *slot = Some(v),
            _ => {
                let message = format!("Invalid {key} record in sub grid header");
                return Err(rd.error(message));
            }
        }
    }

    let required = [
        ("S_LAT", s_lat),
        ("N_LAT", n_lat),
        ("E_LONG", e_long),
        ("W_LONG", w_long),
        ("LAT_INC", lat_inc),
        ("LONG_INC", long_inc),
    ];
    let mut values = [0.0; 6];
    for (i, (key, value)) in required.into_iter().enumerate() {
        values[i] = value
            .ok_or_else(|| rd.error(format!("{key} record is missing in sub grid header")))?;
    }
    let gs_count =
        gs_count.ok_or_else(|| rd.error("GS_COUNT record is missing in sub grid header"))?;

    let [s_lat, n_lat, e_long, w_long, lat_inc, long_inc] = values;
    let extent = GridExtent {
        lat0: s_lat * SECONDS_TO_DEGREES,
        lat1: n_lat * SECONDS_TO_DEGREES,
        dlat: lat_inc * SECONDS_TO_DEGREES,
        lon0: -w_long * SECONDS_TO_DEGREES,
        lon1: -e_long * SECONDS_TO_DEGREES,
        dlon: long_inc * SECONDS_TO_DEGREES,
    };
    Ok((extent, gs_count))
}

/// 读取格值：纬度升序，每行内从东向西
///
/// 逐行分配，内存只随实际读到的数据增长。
fn read_grid_data<R: BufRead>(
    rd: &mut RecordReader<R>,
    nlat: usize,
    nlon: usize,
) -> NzResult<Vec<[f64; 2]>> {
    let mut row: Vec<[f64; 2]> = Vec::new();
    row.try_reserve_exact(nlon)
        .map_err(|_| rd.error(ALLOC_FAILED))?;
    let mut shifts: Vec<[f64; 2]> = Vec::new();

    for _ in 0..nlat {
        row.clear();
        for _ in 0..nlon {
            let Some(line) = rd.next_line()? else {
                return Err(rd.error("Grid file truncated in grid data"));
            };
            let parsed = scan_float(&line, DATA_FIELD_WIDTH).and_then(|(dlat, rest)| {
                scan_float(rest, DATA_FIELD_WIDTH).map(|(dlon, _)| (dlat, dlon))
            });
            let Some((dlat, dlon)) = parsed else {
                return Err(rd.error("Invalid grid data in grid file"));
            };
            row.push([dlat * SECONDS_TO_DEGREES, -dlon * SECONDS_TO_DEGREES]);
        }
        shifts
            .try_reserve(nlon)
            .map_err(|_| rd.error(ALLOC_FAILED))?;
        shifts.extend(row.iter().rev());
    }
    Ok(shifts)
}

// ============================================================================
// 写出
// ============================================================================

fn record<W: Write>(w: &mut W, key: &str, value: impl std::fmt::Display) -> std::io::Result<()> {
    writeln!(w, "{key:<8} {value}")
}

/// 以 NTv2 ASCII 格式写出格网
///
/// 精度列写为 0。写出的文件可由 [`parse_ntv2_ascii`] 读回同一格网。
pub fn write_ntv2_ascii<W: Write>(grid: &ShiftGrid, writer: W) -> NzResult<()> {
    let mut w = BufWriter::new(writer);
    let e = grid.extent();
    let to_sec = |deg: f64| deg * 3600.0;

    record(&mut w, "NUM_OREC", 11)?;
    record(&mut w, "NUM_SREC", 11)?;
    record(&mut w, "NUM_FILE", 1)?;
    record(&mut w, "GS_TYPE", "SECONDS")?;
    record(&mut w, "VERSION", "NTv2.0")?;
    record(&mut w, "SYSTEM_F", grid.datum_from())?;
    record(&mut w, "SYSTEM_T", grid.datum_to())?;
    record(&mut w, "MAJOR_F", "0.000")?;
    record(&mut w, "MINOR_F", "0.000")?;
    record(&mut w, "MAJOR_T", "0.000")?;
    record(&mut w, "MINOR_T", "0.000")?;

    record(&mut w, "SUB_NAME", grid.datum_to())?;
    record(&mut w, "PARENT", "NONE")?;
    record(&mut w, "CREATED", "")?;
    record(&mut w, "UPDATED", "")?;
    record(&mut w, "S_LAT", format!("{:.6}", to_sec(e.lat0)))?;
    record(&mut w, "N_LAT", format!("{:.6}", to_sec(e.lat1)))?;
    record(&mut w, "E_LONG", format!("{:.6}", -to_sec(e.lon1)))?;
    record(&mut w, "W_LONG", format!("{:.6}", -to_sec(e.lon0)))?;
    record(&mut w, "LAT_INC", format!("{:.6}", to_sec(e.dlat)))?;
    record(&mut w, "LONG_INC", format!("{:.6}", to_sec(e.dlon)))?;
    record(&mut w, "GS_COUNT", grid.nlat() * grid.nlon())?;

    for ilat in 0..grid.nlat() {
        for ilon in (0..grid.nlon()).rev() {
            let [dlat, dlon] = grid.shifts()[ilat * grid.nlon() + ilon];
            writeln!(
                w,
                "{:>10.6} {:>10.6} {:>10.6} {:>10.6}",
                to_sec(dlat),
                -to_sec(dlon),
                0.0,
                0.0
            )?;
        }
    }
    writeln!(w, "END")?;
    w.flush()?;
    Ok(())
}

/// 将格网写入文件
pub fn save_ntv2_ascii(grid: &ShiftGrid, path: impl AsRef<Path>) -> NzResult<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| NzError::io_with_source(format!("Cannot create {}", path.display()), e))?;
    write_ntv2_ascii(grid, file)?;
    info!("写出格网 {}", path.display());
    Ok(())
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
NUM_OREC 11
NUM_SREC 11
NUM_FILE 1
GS_TYPE SECONDS
VERSION NTv2.0
SYSTEM_F NZGD49
SYSTEM_T NZGD2000
MAJOR_F 6378388.000
MINOR_F 6356911.946
MAJOR_T 6378137.000
MINOR_T 6356752.314
";

    /// 2x3 格网：纬度 -42..-41，经度 172..174，间距 1°
    fn sub_header(gs_count: usize) -> String {
        format!(
            "\
SUB_NAME NZGD2000
PARENT  NONE
CREATED 01-05-23
UPDATED 01-05-23
S_LAT   -151200.000000
N_LAT   -147600.000000
E_LONG  -626400.000000
W_LONG  -619200.000000
LAT_INC 3600.000000
LONG_INC3600.000000
GS_COUNT{gs_count}
"
        )
    }

    /// 每行从东到西：174, 173, 172
    const DATA: &str = "\
  1.000000  -3.000000  0.0  0.0
  2.000000  -2.000000  0.0  0.0
  3.000000  -1.000000  0.0  0.0
  4.000000  -6.000000  0.0  0.0
  5.000000  -5.000000  0.0  0.0
  6.000000  -4.000000  0.0  0.0
END
";

    fn parse(text: &str) -> NzResult<ShiftGrid> {
        parse_ntv2_ascii(text.as_bytes(), "test.asc")
    }

    fn message(err: NzError) -> String {
        match err {
            NzError::ParseError { message, .. } => message,
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_parse_valid_grid() {
        let grid = parse(&format!("{HEADER}{}{DATA}", sub_header(6))).unwrap();
        assert_eq!(grid.nlat(), 2);
        assert_eq!(grid.nlon(), 3);
        assert_eq!(grid.datum_from(), "NZGD49");
        assert_eq!(grid.datum_to(), "NZGD2000");

        let e = grid.extent();
        assert!((e.lat0 + 42.0).abs() < 1e-12);
        assert!((e.lat1 + 41.0).abs() < 1e-12);
        // 西经为正 -> 东经为正
        assert!((e.lon0 - 172.0).abs() < 1e-12);
        assert!((e.lon1 - 174.0).abs() < 1e-12);
    }

    #[test]
    fn test_rows_run_east_to_west() {
        let grid = parse(&format!("{HEADER}{}{DATA}", sub_header(6))).unwrap();
        // 第一条记录是最东端 (174°)，经度改正取反
        let [dlat, dlon] = grid.shift(0, 2).unwrap();
        assert!((dlat - 1.0 / 3600.0).abs() < 1e-15);
        assert!((dlon - 3.0 / 3600.0).abs() < 1e-15);
        let [dlat, dlon] = grid.shift(0, 0).unwrap();
        assert!((dlat - 3.0 / 3600.0).abs() < 1e-15);
        assert!((dlon - 1.0 / 3600.0).abs() < 1e-15);
        let [dlat, _] = grid.shift(1, 0).unwrap();
        assert!((dlat - 6.0 / 3600.0).abs() < 1e-15);
    }

    #[test]
    fn test_packed_fixed_width_data() {
        let packed = "\
  1.000000-3.0000000.0
  2.000000-2.000000
  3.000000-1.000000
  4.000000-6.000000
  5.000000-5.000000
  6.000000-4.000000
";
        let grid = parse(&format!("{HEADER}{}{packed}", sub_header(6))).unwrap();
        let [dlat, dlon] = grid.shift(0, 2).unwrap();
        assert!((dlat - 1.0 / 3600.0).abs() < 1e-15);
        assert!((dlon - 3.0 / 3600.0).abs() < 1e-15);
    }

    #[test]
    fn test_missing_num_orec() {
        let err = parse("NUM_SREC 11\n").unwrap_err();
        assert_eq!(message(err), "Invalid file header - no NUM_OREC record");
        let err = parse("").unwrap_err();
        assert_eq!(message(err), "Invalid file header - no NUM_OREC record");
        let err = parse("NUM_OREC 0\n").unwrap_err();
        assert_eq!(message(err), "Invalid file header - no NUM_OREC record");
    }

    #[test]
    fn test_header_errors() {
        let cases = [
            (
                "NUM_OREC 3\nNUM_FILE 1\nGS_TYPE SECONDS\n",
                "Missing NUM_SREC record in grid file header",
            ),
            (
                "NUM_OREC 3\nNUM_SREC 11\nGS_TYPE SECONDS\n",
                "Missing NUM_FILE record in grid file header",
            ),
            (
                "NUM_OREC 3\nNUM_SREC 11\nNUM_FILE 1\n",
                "Missing GS_TYPE record in grid file header",
            ),
            (
                "NUM_OREC 4\nNUM_SREC 11\nNUM_FILE 2\nGS_TYPE SECONDS\n",
                "Grid file contains multiple grids - not supported",
            ),
            (
                "NUM_OREC 4\nNUM_SREC 5\nNUM_FILE 1\nGS_TYPE SECONDS\n",
                "Invalid NUM_SREC record",
            ),
            (
                "NUM_OREC 4\nNUM_SREC 11\nNUM_FILE 1\nGS_TYPE MINUTES\n",
                "Unsupported GS_TYPE in grid file - must be SECONDS",
            ),
            (
                "NUM_OREC 11\nNUM_SREC 11\n",
                "Grid file truncated - header incomplete",
            ),
        ];
        for (text, expected) in cases {
            assert_eq!(message(parse(text).unwrap_err()), expected, "{text}");
        }
    }

    #[test]
    fn test_sub_header_errors() {
        let full = sub_header(6);
        for key in ["S_LAT", "N_LAT", "E_LONG", "W_LONG", "LAT_INC", "LONG_INC", "GS_COUNT"] {
            let sub: String = full
                .lines()
                .map(|l| {
                    if split_record(l).0 == key {
                        "COMMENT x\n".to_string()
                    } else {
                        format!("{l}\n")
                    }
                })
                .collect();
            let err = parse(&format!("{HEADER}{sub}{DATA}")).unwrap_err();
            assert_eq!(
                message(err),
                format!("{key} record is missing in sub grid header")
            );
        }

        let bad = full.replace("LAT_INC 3600.000000", "LAT_INC -1.0");
        let err = parse(&format!("{HEADER}{bad}{DATA}")).unwrap_err();
        assert_eq!(message(err), "Invalid LAT_INC record in sub grid header");

        let bad = full.replace("S_LAT   -151200.000000", "S_LAT   abc");
        let err = parse(&format!("{HEADER}{bad}{DATA}")).unwrap_err();
        assert_eq!(message(err), "Invalid S_LAT record in sub grid header");

        let err = parse(&format!("{HEADER}SUB_NAME X\n")).unwrap_err();
        assert_eq!(
            message(err),
            "Grid file truncated - sub grid header incomplete"
        );
    }

    #[test]
    fn test_gs_count_mismatch() {
        let err = parse(&format!("{HEADER}{}{DATA}", sub_header(8))).unwrap_err();
        assert_eq!(
            message(err),
            "GS_COUNT does not match calculated grid dimensions"
        );
    }

    #[test]
    fn test_data_errors() {
        let truncated: String = DATA.lines().take(4).map(|l| format!("{l}\n")).collect();
        let err = parse(&format!("{HEADER}{}{truncated}", sub_header(6))).unwrap_err();
        assert_eq!(message(err), "Grid file truncated in grid data");

        let bad = DATA.replace("  2.000000  -2.000000", "  2.000000  xx");
        let err = parse(&format!("{HEADER}{}{bad}", sub_header(6))).unwrap_err();
        match err {
            NzError::ParseError { line, message, .. } => {
                assert_eq!(message, "Invalid grid data in grid file");
                // 11 条总头 + 11 条子头 + 第 2 条数据
                assert_eq!(line, 24);
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn test_datum_name_truncated() {
        let header = HEADER.replace("SYSTEM_F NZGD49", "SYSTEM_F NZGD49-VERY-LONG-NAME");
        let grid = parse(&format!("{header}{}{DATA}", sub_header(6))).unwrap();
        assert_eq!(grid.datum_from(), "NZGD49-VERY-LON");
    }

    #[test]
    fn test_write_then_read() {
        let extent = GridExtent {
            lat0: -47.5,
            lat1: -34.0,
            dlat: 0.25,
            lon0: 166.0,
            lon1: 179.0,
            dlon: 0.5,
        };
        // 整角秒格值，含超过 10 个字符宽度的负值
        let grid = ShiftGrid::from_fn(extent, "NZGD49", "NZGD2000", |lat, lon| {
            [(lat * 7.0).round() / 3600.0, (lon * 3.0).round() / 3600.0]
        })
        .unwrap();

        let mut buf = Vec::new();
        write_ntv2_ascii(&grid, &mut buf).unwrap();
        let back = parse_ntv2_ascii(buf.as_slice(), "roundtrip").unwrap();

        assert_eq!(back.nlat(), grid.nlat());
        assert_eq!(back.nlon(), grid.nlon());
        assert_eq!(back.datum_from(), "NZGD49");
        for (a, b) in grid.shifts().iter().zip(back.shifts()) {
            assert!((a[0] - b[0]).abs() < 1e-12);
            assert!((a[1] - b[1]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_ntv2_ascii("/nonexistent/grid.asc").unwrap_err();
        assert!(matches!(err, NzError::FileNotFound { .. }));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.asc");
        let grid = parse(&format!("{HEADER}{}{DATA}", sub_header(6))).unwrap();
        save_ntv2_ascii(&grid, &path).unwrap();
        let back = load_ntv2_ascii(&path).unwrap();
        assert_eq!(back.nlat(), 2);
        assert_eq!(back.datum_to(), "NZGD2000");
    }
    #[test]
    fn test_tiny_increments_do_not_overflow() {
        let header = sub_header(6)
            .replace("LAT_INC 3600.000000", "LAT_INC 0.000000001")
            .replace("LONG_INC3600.000000", "LONG_INC0.000000001");
        let err = parse(&format!("{HEADER}{header}{DATA}")).unwrap_err();
        assert_eq!(message(err), "GS_COUNT does not match calculated grid dimensions");
    }

    #[test]
    fn test_huge_declared_grid_without_data() {
        // 2 x 1e18 个格点，GS_COUNT 与之相符但文件中没有格值
        let header = "\
S_LAT   0.000000
N_LAT   1.000000
E_LONG  0.000000
W_LONG  1000000000000000000.000000
LAT_INC 1.000000
LONG_INC1.000000
GS_COUNT2000000000000000000
SUB_NAME NZGD2000
PARENT  NONE
CREATED 01-05-23
UPDATED 01-05-23
";
        let err = parse(&format!("{HEADER}{header}END\n")).unwrap_err();
        assert_eq!(message(err), ALLOC_FAILED);
    }

    #[test]
    fn test_large_declared_grid_truncated() {
        // 格点数可分配，但数据在第一行就结束
        let header = sub_header(6)
            .replace("LAT_INC 3600.000000", "LAT_INC 0.036")
            .replace("LONG_INC3600.000000", "LONG_INC0.072")
            .replace("GS_COUNT6", "GS_COUNT10000200001");
        let err = parse(&format!("{HEADER}{header}END\n")).unwrap_err();
        assert_eq!(message(err), "Invalid grid data in grid file");
    }
}
