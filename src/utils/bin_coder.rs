/// 快照的序列化工具，使用 bincode
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db_error::Result;

/// 初始化bincode的配置
/// 默认配置小端序
const CONFIG: bincode::config::Configuration = bincode::config::standard();

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::serde::decode_from_slice(bytes, CONFIG)?.0)
}

pub fn encode_into<W, T>(writer: &mut W, value: &T) -> Result<()>
where
    W: std::io::Write,
    T: Serialize + ?Sized,
{
    bincode::serde::encode_into_std_write(value, writer, CONFIG)?;
    Ok(())
}
