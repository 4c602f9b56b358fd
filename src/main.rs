fn main() {
    speech_tail_trimmer_lib::run()
}
