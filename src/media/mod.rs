pub mod wav;

pub use wav::{decode_wav, encode_wav, read_wav, write_wav, DecodedAudio, SampleEncoding};
