//! Template content for generated wrapper modules.
//!
//! Placeholders are substituted with [`str::replace`]:
//! - `{executable}`: executable path relative to the package directory, escaped for a python string literal
//! - `{package}`: python package name
//! - `{command}`: console script name

/// Template for `{package}/__main__.py`
pub const MAIN_PY_TEMPLATE: &str = r#"import os
import subprocess
import sys


def main() -> int:
    executable = os.path.join(os.path.dirname(__file__), "{executable}")
    return subprocess.call([executable, *sys.argv[1:]])


if __name__ == "__main__":
    sys.exit(main())
"#;

/// Template for `{package}/exec.py`
pub const EXEC_PY_TEMPLATE: &str = r#"import os
import subprocess
import threading
from dataclasses import dataclass
from queue import Queue
from string import Template
from typing import List, Optional

EXECUTABLE = os.path.join(os.path.dirname(__file__), "{executable}")


@dataclass(frozen=True)
class ExecWithTemplatedOutputResult:
    exit_code: int
    stdout_buffer: Optional[str]
    stderr_buffer: Optional[str]


def create_subprocess(args: List[str], stdout=None, stderr=None, **kwargs) -> subprocess.Popen:
    """
    Start the embedded executable with the given arguments.

    :param args: Arguments passed after the executable path
    :param stdout: Stdout channel
    :param stderr: Stderr channel
    :return: The started process
    """
    return subprocess.Popen([EXECUTABLE, *args], stdout=stdout, stderr=stderr, **kwargs)


def exec_silently(args: List[str], timeout: float = -1) -> subprocess.Popen:
    """
    Run the embedded executable with stdout and stderr discarded and wait for it.

    :param args: Arguments passed after the executable path
    :param timeout: Seconds to wait, values <= 0 wait until the process exits
    :return: The finished process
    """
    process = create_subprocess(args, stdout=subprocess.DEVNULL, stderr=subprocess.DEVNULL)
    process.wait(timeout if timeout > 0 else None)
    return process


def _pump(stream, name: str, queue: Queue) -> None:
    for line in iter(stream.readline, ""):
        queue.put((name, line))
    stream.close()
    queue.put((name, None))


def exec_with_templated_output(args: List[str],
                               capture_output: bool = False,
                               stdout_format: str = "[STDOUT] $line",
                               stderr_format: str = "[STDERR] $line") -> ExecWithTemplatedOutputResult:
    """
    Run the embedded executable and format every line it writes.

    Each stdout and stderr line, stripped of trailing whitespace, is substituted
    as ``$line`` into the matching format string. Formatted lines are printed,
    or collected into the result when ``capture_output`` is set.

    :param args: Arguments passed after the executable path
    :param capture_output: Buffer formatted lines instead of printing them
    :param stdout_format: Template applied to stdout lines
    :param stderr_format: Template applied to stderr lines
    :return: Exit code and the buffered output, ``None`` for a stream with nothing buffered
    """
    process = create_subprocess(args, stdout=subprocess.PIPE, stderr=subprocess.PIPE, text=True)
    templates = {"stdout": Template(stdout_format), "stderr": Template(stderr_format)}
    buffers = {"stdout": "", "stderr": ""}

    queue: Queue = Queue()
    readers = [
        threading.Thread(target=_pump, args=(process.stdout, "stdout", queue), daemon=True),
        threading.Thread(target=_pump, args=(process.stderr, "stderr", queue), daemon=True),
    ]
    for reader in readers:
        reader.start()

    open_streams = len(readers)
    while open_streams:
        name, line = queue.get()
        if line is None:
            open_streams -= 1
            continue

        formatted = templates[name].safe_substitute(line=line.rstrip())
        if capture_output:
            buffers[name] += formatted + "\n"
        else:
            print(formatted)

    for reader in readers:
        reader.join()
    process.wait()

    return ExecWithTemplatedOutputResult(
        exit_code=process.returncode,
        stdout_buffer=buffers["stdout"] or None,
        stderr_buffer=buffers["stderr"] or None,
    )
"#;

/// Template for `{dist_info}/entry_points.txt`
pub const ENTRY_POINTS_TEMPLATE: &str = "[console_scripts]
{command} = {package}.__main__:main
";
