use std::env;
use std::process;

use solfa::{Chord, Field, Fretboard, Interval, Note, Scale};

fn usage() -> ! {
    eprintln!("Usage: solfa chord <name>");
    eprintln!("       solfa identify <note> <note> [note...]");
    eprintln!("       solfa scale <tonic> [type]");
    eprintln!("       solfa field <tonic> [type]");
    eprintln!("       solfa deduce <item> [item...]");
    eprintln!("       solfa fingering <chord> [violao|cavaquinho|bandolim|ukulele]");
    process::exit(1);
}

fn fail(message: String) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        usage();
    }

    match args[1].as_str() {
        "chord" => {
            let chord = match Chord::new(&args[2]) {
                Ok(chord) => chord,
                Err(e) => fail(e.to_string()),
            };
            let notes = chord.notes();
            let names: Vec<&str> = notes.iter().map(Note::name).collect();
            let intervals = chord.intervals();
            let labels: Vec<&str> = intervals.iter().map(Interval::label).collect();
            println!("{}: {} ({})", chord.name(), names.join(" "), labels.join(" "));
        }
        "identify" => {
            let mut notes = Vec::new();
            for name in &args[2..] {
                match Note::new(name) {
                    Ok(note) => notes.push(note),
                    Err(e) => fail(e.to_string()),
                }
            }
            match Chord::identify(&notes) {
                Some(chord) => println!("{}", chord.name()),
                None => {
                    eprintln!("No chord matches those notes");
                    process::exit(1);
                }
            }
        }
        "scale" => {
            let type_name = args.get(3).map_or("major", String::as_str);
            let scale = match Scale::from_type_name(&args[2], type_name) {
                Ok(scale) => scale,
                Err(e) => fail(e.to_string()),
            };
            let notes = scale.notes();
            let names: Vec<&str> = notes.iter().map(Note::name).collect();
            println!("{}: {}", scale, names.join(" "));
            println!("signature: {:+}", scale.signature());
        }
        "field" => {
            let type_name = args.get(3).map_or("major", String::as_str);
            let field = match Field::from_type_name(&args[2], type_name) {
                Ok(field) => field,
                Err(e) => fail(e.to_string()),
            };
            for (degree, (triad, seventh)) in
                field.triads().iter().zip(field.sevenths()).enumerate()
            {
                let degree = degree as u8 + 1;
                println!(
                    "{}: {} / {} [{}]",
                    degree,
                    triad.name(),
                    seventh.name(),
                    field.function(degree)
                );
            }
        }
        "deduce" => {
            let items: Vec<&str> = args[2..].iter().map(String::as_str).collect();
            let ranked = Field::deduce(&items);
            if ranked.is_empty() {
                eprintln!("No field explains any of those items");
                process::exit(1);
            }
            for m in ranked.iter().take(5) {
                println!(
                    "{} {} — {}/{} ({})",
                    m.tonic.name(),
                    m.scale_type.name(),
                    m.matched,
                    items.len(),
                    m.roles.join(" ")
                );
            }
        }
        "fingering" => {
            let chord = match Chord::new(&args[2]) {
                Ok(chord) => chord,
                Err(e) => fail(e.to_string()),
            };
            let board = match args.get(3).map_or("violao", String::as_str) {
                "violao" => Fretboard::violao(),
                "cavaquinho" => Fretboard::cavaquinho(),
                "bandolim" => Fretboard::bandolim(),
                "ukulele" => Fretboard::ukulele(),
                other => fail(format!("unknown instrument '{}'", other)),
            };
            let found = board.fingerings(&chord, 5);
            if found.is_empty() {
                eprintln!("No fingering found for {}", chord.name());
                process::exit(1);
            }
            for fingering in found {
                let frets: Vec<String> = fingering
                    .frets
                    .iter()
                    .map(|f| f.map_or("x".to_string(), |n| n.to_string()))
                    .collect();
                println!("{}", frets.join(" "));
            }
        }
        _ => usage(),
    }
}
