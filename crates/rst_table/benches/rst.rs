use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn get_input() -> Vec<u8> {
    std::fs::read(format!(
        "{}/resources/menu_v4.rst",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn get_dictionary() -> Vec<u8> {
    std::fs::read(format!(
        "{}/resources/hashes.rst.txt",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

pub mod read {
    use divan::Bencher;
    use rst_table::{Dictionary, HashBits, RstFile};

    #[divan::bench]
    fn open(bencher: Bencher) {
        bencher.with_inputs(super::get_input).bench_refs(|data| {
            divan::black_box(RstFile::from_bytes(data).unwrap());
        });
    }

    #[divan::bench]
    fn load_dictionary(bencher: Bencher) {
        bencher.with_inputs(super::get_dictionary).bench_refs(|data| {
            divan::black_box(Dictionary::from_reader(&data[..], HashBits::ThirtyNine).unwrap());
        });
    }
}

pub mod write {
    use divan::Bencher;
    use rst_table::write::RstWriterOptions;
    use rst_table::{Dictionary, HashBits, RstFile, RstWriter};

    #[divan::bench]
    fn render_text(bencher: Bencher) {
        let rst = RstFile::from_bytes(&super::get_input()).unwrap();
        let dictionary =
            Dictionary::from_reader(&super::get_dictionary()[..], HashBits::ThirtyNine).unwrap();

        bencher.bench_local(move || {
            let mut out = RstWriter::new(Vec::new(), RstWriterOptions::default());
            out.write(&rst.resolve(Some(&dictionary))).unwrap();
            divan::black_box(out.into_inner());
        });
    }
}
