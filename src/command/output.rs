use crate::options::OutputOptions;

use super::args::Args;

pub(super) fn push(args: &mut Args, output: &OutputOptions) {
    args.flag_if(output.verbose, "-v");
    if output.silent {
        args.flag("-s");
        args.flag_if(output.show_error, "-S");
    }
    args.flag_if(output.include_headers, "-i");
    args.flag_if(output.head_only, "-I");
    args.value_if_set("-o", &output.output_file);
    args.value_if_set("-D", &output.dump_header);
    args.value_if_set("-w", &output.write_out);
    args.value_if_set("--trace", &output.trace);
    args.value_if_set("--trace-ascii", &output.trace_ascii);
    args.flag_if(output.trace_time, "--trace-time");
    args.flag_if(output.progress_bar, "-#");
    args.flag_if(output.fail_on_error, "-f");
    args.flag_if(output.fail_early, "--fail-early");
    args.flag_if(output.raw, "--raw");
}
