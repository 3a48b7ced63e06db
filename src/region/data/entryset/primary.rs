use bitfield::bitfield;
#[cfg(feature = "chrono")]
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use super::super::entry_type::RawEntryType;
use crate::endian::{Little as LE, Plain};

bitfield! {
    /// Date and time packed as in FAT, two seconds resolution
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Timestamp(u32);
    year_offset, _: 31, 25;
    pub month, _: 24, 21;
    pub day, _: 20, 16;
    pub hour, _: 15, 11;
    pub minute, _: 10, 5;
    double_second, _: 4, 0;
}

impl Timestamp {
    pub fn year(&self) -> u32 {
        1980 + self.year_offset()
    }

    pub fn second(&self) -> u32 {
        self.double_second() * 2
    }
}

bitfield! {
    #[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
    pub struct FileAttributes(u16);
    pub read_only, _: 0, 0;
    pub hidden, _: 1, 1;
    pub system, _: 2, 2;
    pub directory, _: 4, 4;
    pub archive, _: 5, 5;
}

/// Offset from UTC in 15 minutes increments, bit 7 marks it valid
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct UTCOffset(u8);

impl UTCOffset {
    pub fn minutes(&self) -> Option<i16> {
        if self.0 & 0x80 == 0 {
            return None;
        }
        // Sign extend the low 7 bits
        Some(((self.0 << 1) as i8 >> 1) as i16 * 15)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DateTime {
    pub timestamp: Timestamp,
    pub millisecond: u16,
    pub utc_offset: UTCOffset,
}

#[cfg(feature = "chrono")]
impl DateTime {
    /// Wall clock time as recorded, `None` if any field is out of range
    pub fn naive(&self) -> Option<NaiveDateTime> {
        let ts = &self.timestamp;
        let date = NaiveDate::from_ymd_opt(ts.year() as i32, ts.month(), ts.day())?;
        let millis = self.millisecond as u32;
        let time = NaiveTime::from_hms_milli_opt(ts.hour(), ts.minute(), ts.second(), millis)?;
        Some(NaiveDateTime::new(date, time))
    }

    /// Recorded time with its UTC offset, UTC assumed when offset is absent
    pub fn with_offset(&self) -> Option<chrono::DateTime<FixedOffset>> {
        let minutes = self.utc_offset.minutes().unwrap_or(0);
        let offset = FixedOffset::east_opt(minutes as i32 * 60)?;
        offset.from_local_datetime(&self.naive()?).single()
    }
}

#[derive(Copy, Clone, Default, Debug)]
#[repr(C, packed(1))]
pub struct FileDirectory {
    pub(crate) entry_type: RawEntryType,
    pub(crate) secondary_count: u8,
    set_checksum: LE<u16>,
    pub(crate) file_attributes: LE<u16>,
    _reserved1: [u8; 2],
    create_timestamp: LE<u32>,
    last_modified_timestamp: LE<u32>,
    last_accessed_timestamp: LE<u32>,
    create_10ms_increment: u8,
    last_modified_10ms_increment: u8,
    create_utc_offset: UTCOffset,
    last_modified_utc_offset: UTCOffset,
    last_accessed_utc_offset: UTCOffset,
    _reserved2: [u8; 7],
}

unsafe impl Plain for FileDirectory {}

impl FileDirectory {
    pub fn file_attributes(&self) -> FileAttributes {
        FileAttributes(self.file_attributes.to_ne())
    }

    pub fn set_checksum(&self) -> u16 {
        self.set_checksum.to_ne()
    }

    pub fn create_timestamp(&self) -> DateTime {
        DateTime {
            timestamp: Timestamp(self.create_timestamp.to_ne()),
            millisecond: self.create_10ms_increment as u16 * 10,
            utc_offset: self.create_utc_offset,
        }
    }

    pub fn last_modified_timestamp(&self) -> DateTime {
        DateTime {
            timestamp: Timestamp(self.last_modified_timestamp.to_ne()),
            millisecond: self.last_modified_10ms_increment as u16 * 10,
            utc_offset: self.last_modified_utc_offset,
        }
    }

    pub fn last_accessed_timestamp(&self) -> DateTime {
        DateTime {
            timestamp: Timestamp(self.last_accessed_timestamp.to_ne()),
            millisecond: 0,
            utc_offset: self.last_accessed_utc_offset,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{FileDirectory, Timestamp, UTCOffset};
    use crate::endian::read;

    #[test]
    fn test_timestamp() {
        // 2023-06-15 13:45:30
        let value = (43 << 25) | (6 << 21) | (15 << 16) | (13 << 11) | (45 << 5) | 15;
        let timestamp = Timestamp(value);
        assert_eq!(timestamp.year(), 2023);
        assert_eq!(timestamp.month(), 6);
        assert_eq!(timestamp.day(), 15);
        assert_eq!(timestamp.hour(), 13);
        assert_eq!(timestamp.minute(), 45);
        assert_eq!(timestamp.second(), 30);
    }

    #[test]
    fn test_utc_offset() {
        assert_eq!(UTCOffset(0x00).minutes(), None);
        assert_eq!(UTCOffset(0x80 | 32).minutes(), Some(480));
        assert_eq!(UTCOffset(0x80 | 0x7C).minutes(), Some(-60));
    }

    #[test]
    fn test_file_directory() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x85;
        bytes[1] = 2;
        bytes[4] = 0x10;
        bytes[21] = 55;
        let file_directory: FileDirectory = read(&bytes).unwrap();
        assert_eq!(file_directory.secondary_count, 2);
        assert_eq!(file_directory.file_attributes().directory(), 1);
        assert_eq!(file_directory.file_attributes().archive(), 0);
        assert_eq!(file_directory.last_modified_timestamp().millisecond, 550);
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_chrono() {
        use chrono::{Datelike, Timelike};

        let mut bytes = [0u8; 32];
        let value: u32 = (43 << 25) | (6 << 21) | (15 << 16) | (13 << 11) | (45 << 5) | 15;
        bytes[12..16].copy_from_slice(&value.to_le_bytes());
        bytes[21] = 12;
        bytes[23] = 0x80 | 8;
        let file_directory: FileDirectory = read(&bytes).unwrap();
        let datetime = file_directory.last_modified_timestamp().with_offset().unwrap();
        assert_eq!(datetime.year(), 2023);
        assert_eq!(datetime.second(), 30);
        assert_eq!(datetime.timestamp_subsec_millis(), 120);
        assert_eq!(datetime.offset().local_minus_utc(), 2 * 3600);
    }
}
