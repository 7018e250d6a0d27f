use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::Column;
use crate::db_error::Result;
use crate::utils::Value;

/// 读取列集合：`.json` 按 JSON 解析，其余按二进制快照解码
pub fn read_columns<P: AsRef<Path>>(path: P) -> Result<Vec<Column>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let columns = if is_json(path) {
        serde_json::from_slice::<Vec<Column>>(&bytes)?
    } else {
        <Vec<Column> as Value>::decode(&bytes)?
    };
    debug!("read {} columns from {}", columns.len(), path.display());
    Ok(columns)
}

/// 把列集合写成二进制快照
pub fn write_snapshot<P: AsRef<Path>>(path: P, columns: &[Column]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    let mut writer = std::io::BufWriter::new(file);
    <Vec<Column> as Value>::encode_into(&mut writer, columns)?;
    writer.flush()?;
    debug!("wrote {} columns to {}", columns.len(), path.as_ref().display());
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
