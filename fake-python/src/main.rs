//! A stand-in interpreter for tests.
//!
//! `fake-python --version` prints the contents of a `.version` file next to the executable
//! (default `Python 3.12.0`). A version file containing `fail` makes the probe exit 1.
//!
//! `fake-python SCRIPT ARGS...` runs SCRIPT, one directive per line:
//!
//! - `args`: print each of ARGS on its own line
//! - `script`: print SCRIPT
//! - `stdin`: copy stdin to stdout
//! - `print TEXT` / `eprint TEXT`: write TEXT to stdout / stderr
//! - `exit CODE`: exit with CODE
//! - `abort`: abort
//!
//! If `FAKE_PYTHON_LOG` is set, every invocation appends its program name and arguments to
//! that file.

use std::{
    env::{args_os, current_exe, var_os},
    ffi::OsString,
    fs::{OpenOptions, read_to_string},
    io::{Write, copy, stdin, stdout},
    path::Path,
    process::{abort, exit},
};

fn main() {
    let args = args_os().collect::<Vec<_>>();
    assert!(args.len() >= 2, "expect at least one argument");

    let exe = current_exe().unwrap();
    log(&exe, &args[1..]);

    if args[1] == "--version" {
        version(&exe);
        return;
    }

    let script = Path::new(&args[1]);
    let contents = read_to_string(script).unwrap();
    let mut stdout = stdout().lock();
    for line in contents.lines() {
        let (directive, rest) = line.split_once(' ').unwrap_or((line, ""));
        match directive {
            "" => {}
            "args" => {
                for arg in &args[2..] {
                    stdout.write_all(arg.as_encoded_bytes()).unwrap();
                    stdout.write_all(b"\n").unwrap();
                }
            }
            "script" => {
                stdout.write_all(script.as_os_str().as_encoded_bytes()).unwrap();
                stdout.write_all(b"\n").unwrap();
            }
            "stdin" => {
                copy(&mut stdin().lock(), &mut stdout).unwrap();
            }
            "print" => writeln!(stdout, "{rest}").unwrap(),
            "eprint" => eprintln!("{rest}"),
            "exit" => {
                stdout.flush().unwrap();
                exit(rest.parse().unwrap());
            }
            "abort" => {
                stdout.flush().unwrap();
                abort();
            }
            _ => panic!("unknown directive: {line:?}"),
        }
    }
}

fn version(exe: &Path) {
    let version = read_to_string(exe.with_extension("version"))
        .unwrap_or_else(|_| String::from("Python 3.12.0"));
    let version = version.trim();
    if version == "fail" {
        exit(1);
    }
    println!("{version}");
}

fn log(exe: &Path, args: &[OsString]) {
    let Some(path) = var_os("FAKE_PYTHON_LOG") else {
        return;
    };
    let mut line = exe.file_stem().unwrap().to_owned();
    for arg in args {
        line.push(" ");
        line.push(arg);
    }
    line.push("\n");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    file.write_all(line.as_encoded_bytes()).unwrap();
}
