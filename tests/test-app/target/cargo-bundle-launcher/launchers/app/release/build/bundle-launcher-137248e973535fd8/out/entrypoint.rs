# [doc = r" Name of the program executed from the bundle's `lib` directory."] pub const ENTRYPOINT : & str = "app" ; # [doc = r" Value given to the entrypoint as its argument zero."] pub const PROGRAM_NAME : & str = "app" ;