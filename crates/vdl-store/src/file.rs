use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use tracing::{debug, warn};

use vdl_types::{DocumentRecord, ParticipantName};

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;

/// Header size: 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

/// Durable append-only record log.
///
/// On-disk format, one frame per record:
/// ```text
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized DocumentRecord)]
/// ```
///
/// On open the file is read front-to-back into an in-memory index; a frame
/// that fails its CRC check or is truncated marks the end of usable data
/// (a torn write from a crash) and recovery stops there. Every append is
/// flushed and fsynced before the record becomes visible to readers —
/// notarizations are rare and each one follows an on-chain confirmation, so
/// durability wins over write throughput.
pub struct FileRecordStore {
    path: PathBuf,
    writer: Mutex<File>,
    records: RwLock<Vec<DocumentRecord>>,
}

impl FileRecordStore {
    /// Open (or create) a record log at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        let records = Self::recover(path)?;
        debug!(path = %path.display(), count = records.len(), "record log opened");

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(file),
            records: RwLock::new(records),
        })
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn recover(path: &Path) -> StoreResult<Vec<DocumentRecord>> {
        let mut file = BufReader::new(File::open(path)?);
        let file_len = file.get_ref().metadata()?.len();
        let mut records = Vec::new();
        let mut offset: u64 = 0;

        while offset + HEADER_SIZE as u64 <= file_len {
            file.seek(SeekFrom::Start(offset))?;

            let mut header = [0u8; HEADER_SIZE];
            match file.read_exact(&mut header) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }

            let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
            let expected_crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

            if length == 0 || offset + HEADER_SIZE as u64 + length as u64 > file_len {
                warn!(offset, length, file_len, "truncated record frame; stopping recovery");
                break;
            }

            let mut payload = vec![0u8; length as usize];
            match file.read_exact(&mut payload) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    warn!(offset, "torn record frame; stopping recovery");
                    break;
                }
                Err(e) => return Err(e.into()),
            }

            if crc32fast::hash(&payload) != expected_crc {
                warn!(offset, "CRC mismatch; stopping recovery");
                break;
            }

            let record: DocumentRecord = bincode::deserialize(&payload)
                .map_err(|e| StoreError::CorruptEntry {
                    offset,
                    reason: e.to_string(),
                })?;
            records.push(record);

            offset += HEADER_SIZE as u64 + length as u64;
        }

        Ok(records)
    }
}

impl RecordStore for FileRecordStore {
    fn append(&self, record: &DocumentRecord) -> StoreResult<()> {
        let payload =
            bincode::serialize(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let length = payload.len() as u32;
        let crc = crc32fast::hash(&payload);

        {
            let mut file = self.writer.lock().expect("log mutex poisoned");
            file.write_all(&length.to_le_bytes())?;
            file.write_all(&crc.to_le_bytes())?;
            file.write_all(&payload)?;
            file.flush()?;
            file.sync_all()?;
        }

        self.records
            .write()
            .expect("lock poisoned")
            .push(record.clone());
        debug!(participant = %record.participant_name, tx = %record.tx_ref, "record appended");
        Ok(())
    }

    fn latest_for(&self, name: &ParticipantName) -> StoreResult<Option<DocumentRecord>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records
            .iter()
            .rev()
            .find(|r| &r.participant_name == name)
            .cloned())
    }

    fn history_for(&self, name: &ParticipantName) -> StoreResult<Vec<DocumentRecord>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records
            .iter()
            .rev()
            .filter(|r| &r.participant_name == name)
            .cloned()
            .collect())
    }

    fn len(&self) -> StoreResult<u64> {
        Ok(self.records.read().expect("lock poisoned").len() as u64)
    }
}

impl std::fmt::Debug for FileRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRecordStore")
            .field("path", &self.path)
            .field("record_count", &self.records.read().expect("lock poisoned").len())
            .finish()
    }
}
